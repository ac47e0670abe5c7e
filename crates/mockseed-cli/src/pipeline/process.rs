use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::sync::mpsc::{self, Sender};
use std::thread;

use regex::Regex;

/// Spawn `program args`, forward every stdout and stderr line to `on_line`
/// as it arrives, and return the exit code.
///
/// A child killed by a signal reports exit code 1.
pub fn run_streaming(
    program: &Path,
    args: &[OsString],
    on_line: &mut dyn FnMut(&str),
) -> io::Result<i32> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let (tx, rx) = mpsc::channel::<String>();
    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(forward_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(forward_lines(stderr, tx.clone()));
    }
    drop(tx);

    // Ends once both pipes are closed.
    for line in rx {
        on_line(&line);
    }
    for reader in readers {
        let _ = reader.join();
    }

    let status = child.wait()?;
    Ok(status.code().unwrap_or(1))
}

fn forward_lines<R: Read + Send + 'static>(
    source: R,
    tx: Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let reader = BufReader::new(source);
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let line = strip_ansi(line.trim_end_matches('\r'));
            if tx.send(line).is_err() {
                break;
            }
        }
    })
}

fn ansi_escape() -> Option<&'static Regex> {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").ok()).as_ref()
}

/// Remove terminal colour sequences a child may still emit.
fn strip_ansi(line: &str) -> String {
    match ansi_escape() {
        Some(re) => re.replace_all(line, "").into_owned(),
        None => line.to_string(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn merges_both_streams_and_reports_exit_code() {
        let args: Vec<OsString> = vec!["-c".into(), "echo out; echo err 1>&2; exit 3".into()];
        let mut lines = Vec::new();
        let rc = run_streaming(Path::new("sh"), &args, &mut |line| lines.push(line.to_string()))
            .expect("spawn sh");
        assert_eq!(rc, 3);
        lines.sort();
        assert_eq!(lines, vec!["err".to_string(), "out".to_string()]);
    }

    #[test]
    fn forwarded_lines_carry_no_escape_codes() {
        let args: Vec<OsString> = vec![
            "-c".into(),
            r"printf '\033[2m2026-01-01\033[0m \033[33m WARN\033[0m no venue ids\n' 1>&2".into(),
        ];
        let mut lines = Vec::new();
        let rc = run_streaming(Path::new("sh"), &args, &mut |line| lines.push(line.to_string()))
            .expect("spawn sh");
        assert_eq!(rc, 0);
        assert_eq!(lines, vec!["2026-01-01  WARN no venue ids".to_string()]);
        assert!(lines.iter().all(|line| !line.contains('\x1b')));
    }

    #[test]
    fn strips_colour_sequences() {
        assert_eq!(strip_ansi("\x1b[3mpath\x1b[0m\x1b[2m=\x1b[0m/tmp"), "path=/tmp");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let result = run_streaming(
            Path::new("/nonexistent/mockseed-binary"),
            &[],
            &mut |_| {},
        );
        assert!(result.is_err());
    }
}
