//! Terminal form surface over async stdin/stdout.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout},
    sync::Mutex,
};
use tracing::instrument;

use crate::base::types::{Notice, NoticeLevel, Res, Void};

use super::{GenericSurface, Surface};

const BANNER: &str = r#"
== AI Support Chatbot ==
Describe your issue, and our AI will classify it.

How it works:
  1. Enter your own issue, or type `:sample` to pick a sample question.
  2. Press enter to classify your request.
  3. Enter your Name and Phone Number to confirm the ticket (`:new` starts over).
  4. Type `:quit` (or send end of input) to leave.
"#;

// Extra methods on `Surface` applied by the terminal implementation.

impl Surface {
    /// Creates a surface bound to the process stdin/stdout.
    pub fn terminal() -> Self {
        TerminalSurface::new(tokio::io::stdin(), tokio::io::stdout()).into()
    }
}

impl From<TerminalSurface<Stdin, Stdout>> for Surface {
    fn from(surface: TerminalSurface<Stdin, Stdout>) -> Self {
        Self { inner: Arc::new(surface) }
    }
}

// Structs.

/// Line-oriented terminal surface.
pub struct TerminalSurface<R, W> {
    lines: Mutex<Lines<BufReader<R>>>,
    writer: Mutex<W>,
}

impl<R, W> TerminalSurface<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: Mutex::new(BufReader::new(reader).lines()),
            writer: Mutex::new(writer),
        }
    }

    async fn write(&self, text: &str) -> Void {
        let mut writer = self.writer.lock().await;
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn read_line(&self) -> Res<Option<String>> {
        Ok(self.lines.lock().await.next_line().await?)
    }
}

#[async_trait]
impl<R, W> GenericSurface for TerminalSurface<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn show_banner(&self) -> Void {
        self.write(BANNER).await
    }

    #[instrument(name = "TerminalSurface::read_field", skip(self, default))]
    async fn read_field(&self, label: &str, default: Option<&str>) -> Res<Option<String>> {
        match default.filter(|d| !d.is_empty()) {
            Some(default) => self.write(&format!("{label} [{default}]: ")).await?,
            None => self.write(&format!("{label}: ")).await?,
        }

        let Some(line) = self.read_line().await? else {
            return Ok(None);
        };

        // An empty answer keeps the prefilled value.
        match (line.trim().is_empty(), default) {
            (true, Some(default)) => Ok(Some(default.to_string())),
            _ => Ok(Some(line)),
        }
    }

    async fn render(&self, notice: &Notice) -> Void {
        let prefix = match notice.level {
            NoticeLevel::Info => "[info]",
            NoticeLevel::Success => "[ok]",
            NoticeLevel::Warning => "[warn]",
            NoticeLevel::Error => "[error]",
        };

        self.write(&format!("{prefix} {}\n", notice.text)).await
    }

    #[instrument(name = "TerminalSurface::choose", skip(self, options))]
    async fn choose(&self, label: &str, options: &[&str]) -> Res<Option<usize>> {
        let mut menu = format!("{label}\n");
        for (index, option) in options.iter().enumerate() {
            menu.push_str(&format!("  {}. {option}\n", index + 1));
        }
        self.write(&menu).await?;

        loop {
            self.write(&format!("Choose 1-{} (empty to cancel): ", options.len())).await?;

            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };

            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }

            match line.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice - 1)),
                _ => self.write(&format!("`{line}` is not one of the options.\n")).await?,
            }
        }
    }
}
