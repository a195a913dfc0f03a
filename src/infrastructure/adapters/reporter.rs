//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// stderr로 안내/경고를 출력하는 콘솔 리포터 어댑터.
/// stdout은 해석 결과(JSON) 전용으로 남겨 둔다.
pub struct ConsoleReporter {
    colored: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 색상을 쓴다.
    pub fn new() -> Self {
        Self {
            colored: io::stderr().is_terminal(),
        }
    }

    fn line(&self, tag: &str, color: &str, message: &str) {
        if self.colored {
            eprintln!("\x1b[{color}m{tag}\x1b[0m {message}");
        } else {
            eprintln!("{tag} {message}");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn notice(&self, message: &str) {
        self.line("◈", "36", message);
    }

    fn warn(&self, message: &str) {
        self.line("⚠ Warning:", "33", message);
    }

    fn hint(&self, message: &str) {
        self.line("  hint:", "2", message);
    }
}
