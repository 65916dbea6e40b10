//! Blog export to markdown converter
//!
//! Works one line at a time. Lines before and inside the front matter are handled by
//! [`FrontMatterState`]; body lines go through the first matching rule:
//!
//! 1. a line that is exactly a code tag becomes a code fence
//! 2. `[notice]TEXT[/notice]` becomes a `## TEXT` heading
//! 3. `[caption ...]BODY[/caption]` becomes one image per caption entry
//! 4. anything else has its linked images rewritten and is copied through

use super::front_matter::{FrontMatterAction, FrontMatterState, DELIMITER};
use super::options::ConvertOptions;
use super::report::{ConversionReport, WarningKind};
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

const CODE_FENCE: &str = "```";
const CAPTION_ENTRY_START: &str = "[!";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to create {path:?}: {source}")]
    Create {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result of an in-memory conversion
#[derive(Debug)]
pub struct ConversionResult {
    pub markdown: String,
    pub report: ConversionReport,
}

/// Input and output locations derived from a command line argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Derive the output path from the input name.
///
/// A leading `./` is removed and everything from the first `.` on is replaced by `.md`, so
/// `post.v2.txt` also maps to `post.md`.
pub fn output_path_for(file_name: &str) -> ConversionPaths {
    let input = file_name.strip_prefix("./").unwrap_or(file_name);
    let stem = input.split('.').next().unwrap_or(input);
    ConversionPaths {
        input: PathBuf::from(input),
        output: PathBuf::from(format!("{}.md", stem)),
    }
}

pub struct LineConverter {
    options: ConvertOptions,
    notice: Regex,
    caption_block: Regex,
    caption_cleaner: Regex,
    caption: Regex,
    line_break: Regex,
}

impl LineConverter {
    pub fn new(options: ConvertOptions) -> Result<Self, ConvertError> {
        let caption = Regex::new(&format!(
            r".*\({}(.*?)\)(?-u:\s)*(.*)",
            regex::escape(&options.image_url_prefix)
        ))?;
        Ok(Self {
            notice: Regex::new(r"\s*\[notice\](.*)\[/notice\]\s*")?,
            caption_block: Regex::new(r"\[caption.*?\](.*)\[/caption\]")?,
            caption_cleaner: Regex::new(r"\[!\[.*?\]\(.*?\)\]\(.*?\)")?,
            caption,
            line_break: Regex::new(r"\r\n|\r|\n")?,
            options,
        })
    }

    /// Convert text in memory
    pub fn convert(
        &self,
        text: &str,
        input_name: &str,
        output_name: &str,
    ) -> Result<ConversionResult, ConvertError> {
        let start_time = Instant::now();
        let mut report = ConversionReport::new(input_name, output_name);

        let mut buffer = Vec::new();
        self.convert_to_writer(text, &mut buffer, &mut report)
            .map_err(|source| ConvertError::Write {
                source,
                path: PathBuf::from(output_name),
            })?;
        let markdown = String::from_utf8_lossy(&buffer).into_owned();

        report.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(ConversionResult { markdown, report })
    }

    /// Convert `input` into `output`.
    ///
    /// The output is created (and truncated) before the input is read, so a missing input
    /// still leaves an empty output file behind. Nothing is cleaned up on failure.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        let start_time = Instant::now();

        let file = File::create(output).map_err(|source| ConvertError::Create {
            source,
            path: output.to_path_buf(),
        })?;
        let mut writer = BufWriter::new(file);

        let text = fs::read_to_string(input).map_err(|source| ConvertError::Read {
            source,
            path: input.to_path_buf(),
        })?;

        let mut report =
            ConversionReport::new(&input.display().to_string(), &output.display().to_string());
        let write_error = |source: io::Error| ConvertError::Write {
            source,
            path: output.to_path_buf(),
        };
        self.convert_to_writer(&text, &mut writer, &mut report)
            .map_err(write_error)?;
        writer.flush().map_err(write_error)?;

        report.duration_ms = start_time.elapsed().as_millis() as u64;
        log::info!(
            "Converted {} to {} ({} lines, {} warnings)",
            input.display(),
            output.display(),
            report.statistics.total_lines,
            report.warnings.len()
        );
        Ok(report)
    }

    /// Stream the converted text into `writer`, one output line at a time
    pub fn convert_to_writer<W: Write>(
        &self,
        text: &str,
        writer: &mut W,
        report: &mut ConversionReport,
    ) -> io::Result<()> {
        let mut state = FrontMatterState::default();

        for (index, line) in self.split_lines(text).into_iter().enumerate() {
            let line_no = index + 1;
            report.statistics.total_lines += 1;

            match state.advance(line, self.options.keep_title) {
                FrontMatterAction::Open => {
                    log::debug!("line {}: front matter opened", line_no);
                    writeln!(writer, "{}", DELIMITER)?;
                    writer.write_all(self.options.front_matter_header().as_bytes())?;
                }
                FrontMatterAction::Drop => {
                    report.statistics.dropped_lines += 1;
                }
                FrontMatterAction::Keep(kept) => {
                    writeln!(writer, "{}", kept)?;
                }
                FrontMatterAction::Close => {
                    log::debug!("line {}: front matter closed", line_no);
                    writeln!(writer, "{}", DELIMITER)?;
                }
                FrontMatterAction::Body(body) => {
                    report.statistics.body_lines += 1;
                    self.convert_body_line(body, line_no, writer, report)?;
                }
            }
        }

        report.front_matter = state;
        match state {
            FrontMatterState::NotStarted => report.add_warning(
                0,
                WarningKind::UnterminatedFrontMatter,
                "No front matter delimiter found, nothing was converted",
            ),
            FrontMatterState::InProgress => report.add_warning(
                0,
                WarningKind::UnterminatedFrontMatter,
                "Front matter was never closed, the rest of the file was dropped",
            ),
            FrontMatterState::Done => {}
        }

        Ok(())
    }

    /// Split on `\r\n`, `\r` or `\n`. A terminator at the very end does not open an extra line.
    fn split_lines<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut lines: Vec<&str> = self.line_break.split(text).collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        lines
    }

    fn convert_body_line<W: Write>(
        &self,
        line: &str,
        line_no: usize,
        writer: &mut W,
        report: &mut ConversionReport,
    ) -> io::Result<()> {
        if self.options.is_code_tag(line) {
            report.statistics.increment_rule("code_fences");
            return writeln!(writer, "{}", CODE_FENCE);
        }

        if let Some(captures) = self.notice.captures(line) {
            log::debug!("line {}: notice", line_no);
            report.statistics.increment_rule("notices");
            return writeln!(writer, "## {}", &captures[1]);
        }

        if let Some(captures) = self.caption_block.captures(line) {
            log::debug!("line {}: caption block", line_no);
            for entry in split_caption_entries(&captures[1]) {
                match self.caption_image(entry) {
                    Some(image) => {
                        report.statistics.increment_rule("captions");
                        write!(writer, "\n{}\n", image)?;
                    }
                    None if entry.trim().is_empty() => {}
                    None => report.add_warning(
                        line_no,
                        WarningKind::DroppedContent,
                        format!("Dropped caption entry {:?}", entry),
                    ),
                }
            }
            return Ok(());
        }

        for fragment in self.clean_linked_images(line, report) {
            // Converted posts must not introduce top level headings
            if fragment.starts_with("# ") {
                report.statistics.increment_rule("headings_demoted");
                write!(writer, "#")?;
            }
            writeln!(writer, "{}", fragment)?;
        }
        Ok(())
    }

    /// Pull every `[![..](..)](..)` out of the line, in order, followed by what is left.
    fn clean_linked_images(&self, line: &str, report: &mut ConversionReport) -> Vec<String> {
        let mut fragments = Vec::new();
        for found in self.caption_cleaner.find_iter(line) {
            match self.caption_image(found.as_str()) {
                Some(image) => {
                    report.statistics.increment_rule("images");
                    fragments.push(format!("\n{}\n", image));
                }
                None => fragments.push(found.as_str().to_string()),
            }
        }
        fragments.push(self.caption_cleaner.replace_all(line, "").into_owned());
        fragments
    }

    fn caption_image(&self, text: &str) -> Option<String> {
        let captures = self.caption.captures(text)?;
        Some(format!("![{}]({})", &captures[2], &captures[1]))
    }
}

/// Split a caption body right before every `[!`, dropping the whitespace ahead of it.
fn split_caption_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    for (index, _) in body.match_indices(CAPTION_ENTRY_START) {
        if index > start {
            entries.push(
                body[start..index]
                    .trim_end_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b'),
            );
            start = index;
        }
    }
    entries.push(&body[start..]);
    entries
}
