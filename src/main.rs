//! Host-side helper: `cargo run` bundles the page glue with wasm-pack and
//! serves `dist/` locally so the page can be checked in a browser.

use std::process::{Command, ExitCode};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

fn main() -> ExitCode {
    // Only meaningful on non-wasm targets.
    if cfg!(target_arch = "wasm32") {
        return ExitCode::SUCCESS;
    }

    let port = match env::var("FOLIO_PORT") {
        Ok(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                eprintln!("FOLIO_PORT={raw:?} is not a port number");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    // 1. Build the wasm bundle; build.rs has already mirrored static/ into dist/.
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "dist/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); serving whatever dist/pkg holds."
            );
        }
    }

    // 2. Serve dist/.
    println!("Serving dist/ at http://127.0.0.1:{port} …");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "dist"])
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            eprintln!("could not start http server: {err}");
            return ExitCode::FAILURE;
        }
    };

    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                return ExitCode::FAILURE;
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(err) => {
                eprintln!("lost track of http server: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
}
