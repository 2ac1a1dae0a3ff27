use std::ffi::OsStr;
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";
const ERROR_RESPONSE: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// How the mock server answers each connection.
#[derive(Clone, Copy)]
pub enum ServerBehavior {
    AlwaysOk,
    FailEveryTenth,
    Delay(Duration),
}

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests, or return `None` when the
/// environment refuses local sockets so the caller can skip instead of
/// failing.
///
/// # Errors
///
/// Returns an error on any bind failure other than a permission refusal.
pub fn spawn_http_server_or_skip(
    behavior: ServerBehavior,
) -> Result<Option<(String, ServerHandle)>, String> {
    match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => spawn_on(listener, behavior).map(Some),
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("Skipping test: cannot bind a local server ({})", err);
            Ok(None)
        }
        Err(err) => Err(format!("bind test server failed: {}", err)),
    }
}

fn spawn_on(
    listener: TcpListener,
    behavior: ServerBehavior,
) -> Result<(String, ServerHandle), String> {
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut served: usize = 0;
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let connection = served;
                    served = served.wrapping_add(1);
                    thread::spawn(move || handle_client(stream, behavior, connection));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, behavior: ServerBehavior, served: usize) {
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    let response = match behavior {
        ServerBehavior::AlwaysOk => OK_RESPONSE,
        ServerBehavior::FailEveryTenth => {
            if served % 10 == 0 {
                ERROR_RESPONSE
            } else {
                OK_RESPONSE
            }
        }
        ServerBehavior::Delay(delay) => {
            thread::sleep(delay);
            OK_RESPONSE
        }
    };
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `wavecheck` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_wavecheck<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = wavecheck_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run wavecheck failed: {}", err))
}

/// Run the `wavecheck` binary from a specific working directory.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_wavecheck_in<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = wavecheck_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run wavecheck failed: {}", err))
}

fn wavecheck_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_wavecheck").map_or_else(
        || Err("CARGO_BIN_EXE_wavecheck missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

/// Locate the one JSON + HTML artifact pair a run left under `dir`.
///
/// # Errors
///
/// Returns an error when the directory cannot be read or an artifact is
/// missing.
pub fn find_report_pair(dir: &Path) -> Result<(PathBuf, PathBuf), String> {
    let mut json = None;
    let mut html = None;
    for entry in fs::read_dir(dir).map_err(|err| format!("read reports dir failed: {}", err))? {
        let entry = entry.map_err(|err| format!("read dir entry failed: {}", err))?;
        let path = entry.path();
        let ext = path.extension().and_then(|ext| ext.to_str());
        if ext == Some("json") {
            json = Some(path);
        } else if ext == Some("html") {
            html = Some(path);
        }
    }
    let json = json.ok_or_else(|| "Expected a JSON report artifact.".to_owned())?;
    let html = html.ok_or_else(|| "Expected an HTML report artifact.".to_owned())?;
    Ok((json, html))
}
