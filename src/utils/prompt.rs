use crate::utils::error::Result;
use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

/// 逐行互動的輸入/輸出封裝，測試時可用 `Cursor` 取代 stdin
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl Prompter<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 輸出一行文字
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// 顯示提示並讀取一行；輸入結束 (EOF) 時回傳 `None`
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
        tracing::trace!("prompt '{}' answered with '{}'", prompt.trim(), trimmed);
        Ok(Some(trimmed))
    }

    /// 重複提示直到 `parse` 成功；每次失敗都會印出錯誤訊息
    pub fn ask_until<T, F>(&mut self, prompt: &str, mut parse: F) -> Result<Option<T>>
    where
        F: FnMut(&str) -> std::result::Result<T, String>,
    {
        loop {
            let Some(raw) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => self.say(message)?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Prompter;
    use std::io::Cursor;

    pub type ScriptedPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

    /// 以預先寫好的輸入行建立 Prompter
    pub fn scripted(lines: &[&str]) -> ScriptedPrompter {
        let mut script = lines.join("\n");
        script.push('\n');
        Prompter::new(Cursor::new(script.into_bytes()), Vec::new())
    }

    pub fn transcript(prompter: ScriptedPrompter) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{scripted, transcript};

    #[test]
    fn test_ask_returns_line_without_newline() {
        let mut prompter = scripted(&["hello"]);
        assert_eq!(prompter.ask("> ").unwrap(), Some("hello".to_string()));
        assert_eq!(prompter.ask("> ").unwrap(), None);
    }

    #[test]
    fn test_ask_until_reprompts_on_error() {
        let mut prompter = scripted(&["abc", "-4", "12"]);
        let value = prompter
            .ask_until("Number: ", |raw| {
                raw.parse::<u32>()
                    .map_err(|_| "Invalid input. Please enter an integer.".to_string())
            })
            .unwrap();

        assert_eq!(value, Some(12));
        let output = transcript(prompter);
        assert_eq!(output.matches("Invalid input").count(), 2);
    }
}
