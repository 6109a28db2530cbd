use chrono::{DateTime, Local};
use std::fmt::Display;
use std::io::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 帶時間戳的狀態輸出；`>>>` 開始、`<<<` 完成、`???` 例外
pub struct StatusReporter<W: Write> {
    out: W,
    clock: fn() -> DateTime<Local>,
}

impl StatusReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StatusReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clock: Local::now,
        }
    }

    pub fn with_clock(out: W, clock: fn() -> DateTime<Local>) -> Self {
        Self { out, clock }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn timestamp(&self) -> String {
        (self.clock)().format(TIMESTAMP_FORMAT).to_string()
    }

    // stdout 關閉時不讓整個流程失敗，只記錄下來
    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write status line: {}", e);
        }
    }

    fn line(&mut self, prefix: &str, message: impl Display) {
        let ts = self.timestamp();
        self.emit(&format!("{} {} {}", prefix, ts, message));
    }

    pub fn connecting(&mut self) {
        tracing::info!("🚀 Connecting to Firestore");
        self.line(">>>", "Started connecting to Firestore database...");
    }

    pub fn connected(&mut self) {
        tracing::info!("✅ Firestore client initialized");
        self.line("<<<", "Firestore database connected \n---");
    }

    pub fn detail(&mut self, message: impl Display) {
        let message = message.to_string();
        tracing::info!("📄 {}", message);
        self.emit(&format!("    {}", message));
    }

    pub fn exception(&mut self, error: impl Display) {
        let message = format!("Exception in doing...: {}", error);
        tracing::error!("❌ {}", message);
        self.line("???", message);
    }

    pub fn finished(&mut self) {
        tracing::info!("✅ Document operation finished");
        self.line("<<<", "Finished doing...\n---");
    }
}
