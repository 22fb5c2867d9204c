use anyhow::Result;
use folio_runtime::{Choice, ConfirmDialog};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented stdin reader shared by prompts and `browse`.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next line, trimmed; `None` at end of input.
    pub async fn line(&mut self) -> Result<Option<String>> {
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Ask on stderr; an empty answer or end of input dismisses.
    pub async fn confirm(&mut self, dialog: &ConfirmDialog) -> Result<Choice> {
        eprint!("{}? [y/N] ", dialog.confirm_label);
        std::io::stderr().flush()?;
        Ok(parse_choice(self.line().await?.as_deref()))
    }
}

fn parse_choice(answer: Option<&str>) -> Choice {
    match answer.map(str::to_ascii_lowercase).as_deref() {
        Some("y") | Some("yes") => Choice::Confirm,
        None | Some("") => Choice::Dismiss,
        Some(_) => Choice::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice(Some("y")), Choice::Confirm);
        assert_eq!(parse_choice(Some("YES")), Choice::Confirm);
        assert_eq!(parse_choice(Some("n")), Choice::Cancel);
        assert_eq!(parse_choice(Some("")), Choice::Dismiss);
        assert_eq!(parse_choice(None), Choice::Dismiss);
    }
}
