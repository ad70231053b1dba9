//! Line-oriented input: commands, form fields and yes/no questions

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{error::AppResult, services::Confirm};

pub struct LinePrompt<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> LinePrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_out(self) -> W {
        self.out
    }

    /// Print a label and read one line. `None` once input is exhausted.
    pub async fn read_line(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Ask for a field value; an empty answer keeps `current`
    pub async fn field(&mut self, label: &str, current: &str) -> AppResult<String> {
        match self.read_line(&field_label(label, current)).await? {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Ok(current.to_string()),
        }
    }

    /// Ask for an optional field. Empty keeps `current`, a lone `-` clears it.
    pub async fn optional_field(
        &mut self,
        label: &str,
        current: Option<&str>,
    ) -> AppResult<Option<String>> {
        let answer = self
            .read_line(&field_label(label, current.unwrap_or("")))
            .await?;
        Ok(match answer.as_deref() {
            Some("-") => None,
            Some(answer) if !answer.is_empty() => Some(answer.to_string()),
            _ => current.map(str::to_string),
        })
    }
}

fn field_label(label: &str, current: &str) -> String {
    if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    }
}

#[async_trait]
impl<R, W> Confirm for LinePrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn confirm(&mut self, question: &str) -> AppResult<bool> {
        let answer = self.read_line(&format!("{} [y/N] ", question)).await?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }
}
