use std::time::Duration;

use folio_wasm::carousel::{CarouselController, CarouselSurface, Orientation};
use folio_wasm::config::CarouselConfig;

/// In-memory stand-in for the page: records what the controller asked for.
#[derive(Debug, Default)]
struct FakeSurface {
    video_active: Vec<bool>,
    dot_active: Vec<bool>,
    playing: Vec<bool>,
    muted: Vec<bool>,
    volume: Vec<f64>,
    orientations: Vec<Option<Orientation>>,
    slider: Option<Orientation>,
    aria_pressed: Option<bool>,
    mute_flag: bool,
    next_timer: u32,
    live_timers: Vec<u32>,
    intervals: Vec<Duration>,
    blurs: usize,
    resumes: usize,
}

impl FakeSurface {
    fn with_videos(count: usize) -> Self {
        Self {
            video_active: vec![false; count],
            dot_active: vec![false; count],
            playing: vec![false; count],
            muted: vec![false; count],
            volume: vec![0.5; count],
            orientations: vec![None; count],
            ..Self::default()
        }
    }

    fn active_videos(&self) -> Vec<usize> {
        indices(&self.video_active)
    }

    fn active_dots(&self) -> Vec<usize> {
        indices(&self.dot_active)
    }

    fn playing(&self) -> Vec<usize> {
        indices(&self.playing)
    }
}

fn indices(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect()
}

impl CarouselSurface for FakeSurface {
    type Timer = u32;

    fn video_count(&self) -> usize {
        self.video_active.len()
    }

    fn mark_active(&mut self, index: usize) {
        for (i, flag) in self.video_active.iter_mut().enumerate() {
            *flag = i == index;
        }
        for (i, flag) in self.dot_active.iter_mut().enumerate() {
            *flag = i == index;
        }
    }

    fn sync_video(&mut self, index: usize, play: bool) {
        if play {
            self.muted[index] = self.mute_flag;
        }
        self.playing[index] = play;
    }

    fn orientation(&self, index: usize) -> Option<Orientation> {
        self.orientations[index]
    }

    fn apply_orientation(&mut self, orientation: Orientation) {
        self.slider = Some(orientation);
    }

    fn apply_mute(&mut self, muted: bool) {
        self.mute_flag = muted;
        for i in 0..self.muted.len() {
            self.muted[i] = muted;
            if !muted {
                self.volume[i] = 1.0;
            }
        }
        self.aria_pressed = Some(!muted);
    }

    fn resume_if_paused(&mut self, index: usize) {
        if !self.playing[index] {
            self.playing[index] = true;
            self.resumes += 1;
        }
    }

    fn blur_controls(&mut self) {
        self.blurs += 1;
    }

    fn start_timer(&mut self, interval: Duration) -> Option<u32> {
        self.next_timer += 1;
        self.live_timers.push(self.next_timer);
        self.intervals.push(interval);
        Some(self.next_timer)
    }

    fn clear_timer(&mut self, timer: u32) {
        self.live_timers.retain(|t| *t != timer);
    }
}

fn controller(count: usize) -> CarouselController<FakeSurface> {
    let mut c = CarouselController::new(FakeSurface::with_videos(count), CarouselConfig::default())
        .expect("videos present");
    c.initialize();
    c
}

fn assert_single_active(c: &CarouselController<FakeSurface>) {
    let index = c.current_index();
    assert!(index < c.surface().video_count());
    assert_eq!(c.surface().active_videos(), vec![index]);
    assert_eq!(c.surface().active_dots(), vec![index]);
}

#[test]
fn no_videos_means_no_controller() {
    assert!(CarouselController::new(FakeSurface::with_videos(0), CarouselConfig::default()).is_none());
}

#[test]
fn initial_state_is_first_video_paused_and_muted() {
    let c = controller(3);
    assert_eq!(c.current_index(), 0);
    assert!(c.is_muted());
    assert!(!c.is_cycling());
    assert!(c.surface().playing().is_empty());
    assert_eq!(c.surface().aria_pressed, Some(false));
    assert_single_active(&c);
}

#[test]
fn advances_wrap_around() {
    let mut c = controller(4);
    for _ in 0..3 {
        c.advance();
    }
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.surface().playing(), vec![3]);
    c.advance();
    assert_eq!(c.current_index(), 0);
    assert_single_active(&c);
}

#[test]
fn index_stays_in_bounds_for_mixed_input() {
    let mut c = controller(3);
    let script = [2usize, 7, 0, 1, 3, 2];
    for (step, &dot) in script.iter().enumerate() {
        c.select(dot);
        assert_single_active(&c);
        if step % 2 == 0 {
            c.advance();
            assert_single_active(&c);
        }
    }
}

#[test]
fn out_of_range_select_keeps_current() {
    let mut c = controller(2);
    c.select(1);
    c.select(5);
    assert_eq!(c.current_index(), 1);
}

#[test]
fn dot_click_restarts_single_timer() {
    let mut c = controller(3);
    c.pointer_enter();
    assert_eq!(c.surface().live_timers.len(), 1);
    c.select(2);
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.surface().playing(), vec![2]);
    assert_eq!(c.surface().live_timers.len(), 1);
    assert_eq!(c.surface().next_timer, 2);
}

#[test]
fn start_is_guarded_against_duplicates() {
    let mut c = controller(3);
    c.start();
    c.start();
    c.pointer_enter();
    assert_eq!(c.surface().live_timers.len(), 1);
    assert_eq!(c.surface().intervals, vec![Duration::from_millis(21_600)]);
}

#[test]
fn single_video_never_cycles() {
    let mut c = controller(1);
    c.pointer_enter();
    assert!(!c.is_cycling());
    assert_eq!(c.surface().playing(), vec![0]);
}

#[test]
fn mouse_leave_resets_to_first_paused() {
    for start in 0..4 {
        let mut c = controller(4);
        c.pointer_enter();
        c.select(start);
        c.pointer_leave();
        assert_eq!(c.current_index(), 0);
        assert!(c.surface().playing().is_empty());
        assert!(c.surface().live_timers.is_empty());
        assert_eq!(c.surface().blurs, 1);
        assert_single_active(&c);
    }
}

#[test]
fn mute_toggle_twice_restores_state() {
    let mut c = controller(2);
    c.toggle_mute();
    assert!(!c.is_muted());
    assert_eq!(c.surface().aria_pressed, Some(true));
    assert!(c.surface().muted.iter().all(|m| !m));
    assert!(c.surface().volume.iter().all(|v| *v == 1.0));

    c.toggle_mute();
    assert!(c.is_muted());
    assert_eq!(c.surface().aria_pressed, Some(false));
    assert!(c.surface().muted.iter().all(|m| *m));
}

#[test]
fn played_video_takes_current_mute_state() {
    let mut c = controller(3);
    c.pointer_enter();
    assert!(c.surface().muted[0]);
    c.toggle_mute();
    c.advance();
    assert_eq!(c.surface().playing(), vec![1]);
    assert!(!c.surface().muted[1]);
}

#[test]
fn unmuting_resumes_paused_active_video() {
    let mut c = controller(3);
    c.toggle_mute();
    assert_eq!(c.surface().resumes, 1);
    assert_eq!(c.surface().playing(), vec![0]);

    // Muting never resumes.
    c.toggle_mute();
    assert_eq!(c.surface().resumes, 1);
}

#[test]
fn narrow_viewport_cycles_without_hover() {
    let mut c = controller(4);
    c.sync_viewport(true);
    assert!(c.is_cycling());
    assert_eq!(c.surface().playing(), vec![0]);
    c.advance();
    assert_eq!(c.current_index(), 1);

    c.sync_viewport(false);
    assert!(!c.is_cycling());
    assert_eq!(c.current_index(), 0);
}

#[test]
fn slider_follows_active_orientation() {
    let mut surface = FakeSurface::with_videos(3);
    surface.orientations[1] = Some(Orientation::Portrait);
    surface.orientations[2] = Some(Orientation::Square);
    let mut c = CarouselController::new(surface, CarouselConfig::default()).expect("videos present");
    c.initialize();
    assert_eq!(c.surface().slider, Some(Orientation::Landscape));
    c.select(1);
    assert_eq!(c.surface().slider, Some(Orientation::Portrait));
    c.advance();
    assert_eq!(c.surface().slider, Some(Orientation::Square));

    c.surface_mut().orientations[0] = Some(Orientation::Portrait);
    c.advance();
    assert_eq!(c.surface().slider, Some(Orientation::Portrait));
}

#[test]
fn configured_interval_is_used() {
    let config = CarouselConfig {
        advance_interval: Duration::from_secs(5),
        ..CarouselConfig::default()
    };
    let mut c = CarouselController::new(FakeSurface::with_videos(2), config).expect("videos present");
    c.start();
    assert_eq!(c.surface().intervals, vec![Duration::from_secs(5)]);
}
