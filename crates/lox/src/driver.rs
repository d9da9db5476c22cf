use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use lox_scanner::{ScanErrors, Scanner, Token};
use thiserror::Error;

use crate::report;

/// Name used for diagnostics on REPL input.
const PROMPT_SOURCE: &str = "<stdin>";

/// How scanned tokens are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `KIND lexeme literal` line per token.
    #[default]
    Text,
    /// The whole token list as a JSON array.
    Json,
}

/// Driver settings taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub format: OutputFormat,
    /// Render errors as annotated source snippets.
    pub fancy: bool,
    pub color: bool,
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("could not read '{}': {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Host driver: feeds whole sources to the scanner and reports the result.
///
/// `out` receives tokens, `err` receives lexical errors.
pub struct Lox<W, E> {
    options: Options,
    out: W,
    err: E,
    had_error: bool,
}

impl<W: Write, E: Write> Lox<W, E> {
    pub fn new(options: Options, out: W, err: E) -> Self {
        Self {
            options,
            out,
            err,
            had_error: false,
        }
    }

    /// True if the last file or line scanned reported a lexical error.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Scan a whole script file.
    pub fn run_file(&mut self, path: &Path) -> Result<(), DriverError> {
        let source = fs::read_to_string(path).map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        self.run(&source, &file_name)
    }

    /// Read-scan-print loop. Ends on an empty line or end of input.
    pub fn run_prompt<R: BufRead>(&mut self, mut input: R) -> Result<(), DriverError> {
        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let source = line.trim_end_matches(&['\n', '\r'][..]);
            if source.is_empty() {
                break;
            }

            self.run(source, PROMPT_SOURCE)?;
            self.had_error = false;
        }
        Ok(())
    }

    /// Scan one source, report its errors, then print its tokens.
    pub fn run(&mut self, source: &str, file_name: &str) -> Result<(), DriverError> {
        let (tokens, result) = Scanner::new(source).scan_tokens();

        if let Err(errors) = result {
            self.report(&errors, source, file_name)?;
        }

        self.print_tokens(&tokens)
    }

    fn report(&mut self, errors: &ScanErrors, source: &str, file_name: &str) -> io::Result<()> {
        for diag in errors.to_diagnostics().diagnostics() {
            if self.options.fancy {
                report::write_fancy(diag, source, file_name, self.options.color, &mut self.err)?;
            } else {
                report::write_plain(diag, &mut self.err)?;
            }
        }
        self.had_error = true;
        Ok(())
    }

    fn print_tokens(&mut self, tokens: &[Token]) -> Result<(), DriverError> {
        match self.options.format {
            OutputFormat::Text => {
                for token in tokens {
                    writeln!(self.out, "{}", token)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, tokens)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lox(options: Options) -> Lox<Vec<u8>, Vec<u8>> {
        Lox::new(options, Vec::new(), Vec::new())
    }

    fn output(lox: Lox<Vec<u8>, Vec<u8>>) -> (String, String) {
        (
            String::from_utf8(lox.out).unwrap(),
            String::from_utf8(lox.err).unwrap(),
        )
    }

    #[test]
    fn prints_tokens_as_text() {
        let mut lox = lox(Options::default());
        lox.run("var x = \"hi\";", "test.lox").unwrap();
        assert!(!lox.had_error());

        let (out, err) = output(lox);
        assert_eq!(
            out,
            "VAR var \nIDENTIFIER x \nEQUAL = \nSTRING \"hi\" hi\nSEMICOLON ; \nEOF  \n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn errors_are_reported_before_tokens() {
        let mut lox = lox(Options::default());
        lox.run("1 @ 2\n#", "test.lox").unwrap();
        assert!(lox.had_error());

        let (out, err) = output(lox);
        assert_eq!(
            err,
            "[line 1] Error: unexpected character @\n[line 2] Error: unexpected character #\n"
        );
        assert_eq!(out, "NUMBER 1 1\nNUMBER 2 2\nEOF  \n");
    }

    #[test]
    fn json_output() {
        let options = Options {
            format: OutputFormat::Json,
            ..Options::default()
        };
        let mut lox = lox(options);
        lox.run("1.5", "test.lox").unwrap();

        let (out, _) = output(lox);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["kind"], "NUMBER");
        assert_eq!(json[0]["literal"]["number"], "1.5");
        assert_eq!(json[1]["kind"], "EOF");
    }

    #[test]
    fn fancy_errors_name_the_file() {
        let options = Options {
            fancy: true,
            ..Options::default()
        };
        let mut lox = lox(options);
        lox.run("\"open", "script.lox").unwrap();

        let (_, err) = output(lox);
        assert!(err.contains("script.lox"), "{}", err);
        assert!(err.contains("unterminated string"), "{}", err);
    }

    #[test]
    fn prompt_resets_error_flag_per_line() {
        let mut lox = lox(Options::default());
        lox.run_prompt("@\n1\n".as_bytes()).unwrap();
        assert!(!lox.had_error());

        let (out, err) = output(lox);
        assert_eq!(err, "[line 1] Error: unexpected character @\n");
        assert_eq!(out, "> EOF  \n> NUMBER 1 1\nEOF  \n> ");
    }

    #[test]
    fn prompt_stops_at_empty_line() {
        let mut lox = lox(Options::default());
        lox.run_prompt("\r\nprint\n".as_bytes()).unwrap();

        let (out, _) = output(lox);
        assert_eq!(out, "> ");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let mut lox = lox(Options::default());
        let path = Path::new("definitely/not/here.lox");
        let err = lox.run_file(path).unwrap_err();
        assert!(matches!(err, DriverError::Read { .. }));
        assert!(err
            .to_string()
            .starts_with("could not read 'definitely/not/here.lox'"));
    }

    #[test]
    fn run_file_scans_contents() {
        let path = std::env::temp_dir().join(format!("lox-driver-{}.lox", std::process::id()));
        fs::write(&path, "print 1;\n@").unwrap();

        let mut lox = lox(Options::default());
        let result = lox.run_file(&path);
        fs::remove_file(&path).unwrap();
        result.unwrap();
        assert!(lox.had_error());

        let (out, err) = output(lox);
        assert_eq!(out, "PRINT print \nNUMBER 1 1\nSEMICOLON ; \nEOF  \n");
        assert_eq!(err, "[line 2] Error: unexpected character @\n");
    }
}
