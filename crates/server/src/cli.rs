//! CLI argument parsing and subcommand dispatch.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use recap_core::{
    assemble_text, effective_instruction, guess_mime_type, merge_instructions, require_text, Config,
    UploadedFile,
};
use recap_export::{encode_document, ExportFormat};
use recap_ingest::TextExtractor;
use recap_llm::Summarizer;
use tracing::info;

use crate::router;

/// Meeting-notes summarizer.
///
/// Runs the HTTP server by default; the other subcommands do one job and exit.
#[derive(Parser, Debug)]
#[command(name = "recap-server", version, about = "Meeting-notes summarizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve,
    /// Print the text extracted from one file
    Extract {
        file: PathBuf,
        /// Declared MIME type (guessed from the extension if omitted)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Encode a plain-text summary file as txt, md, docx, or pdf
    Export {
        format: ExportFormat,
        input: PathBuf,
        /// Output path (default: summary.<ext> in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Summarize files and/or text once and print the result
    Summarize {
        files: Vec<PathBuf>,
        /// Pasted text appended after the files
        #[arg(long)]
        text: Option<String>,
        /// Preset style; repeat for several
        #[arg(long = "instruction")]
        instructions: Vec<String>,
        /// Free-form instruction appended after the presets
        #[arg(long)]
        custom: Option<String>,
    },
}

/// Run the selected subcommand; no subcommand means `serve`.
pub async fn dispatch(config: Config, command: Option<Command>) -> anyhow::Result<()> {
    match command.unwrap_or(Command::Serve) {
        Command::Serve => router::serve(config).await,
        Command::Extract { file, mime } => {
            let extractor = TextExtractor::from_config(&config.ocr);
            let text = extract_file(&extractor, &file, mime.as_deref())?;
            print!("{text}");
            Ok(())
        }
        Command::Export {
            format,
            input,
            output,
        } => {
            let path = export_file(format, &input, output)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Summarize {
            files,
            text,
            instructions,
            custom,
        } => {
            let summary = summarize_files(
                &config,
                &files,
                text.as_deref().unwrap_or_default(),
                &instructions,
                custom.as_deref(),
            )
            .await?;
            println!("{summary}");
            Ok(())
        }
    }
}

fn read_upload(path: &Path, mime: Option<&str>) -> anyhow::Result<UploadedFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file path: {}", path.display()))?
        .to_string();
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mime_type = mime.unwrap_or_else(|| guess_mime_type(&name)).to_string();
    Ok(UploadedFile::new(name, mime_type, bytes))
}

pub fn extract_file(
    extractor: &TextExtractor,
    path: &Path,
    mime: Option<&str>,
) -> anyhow::Result<String> {
    let file = read_upload(path, mime)?;
    extractor
        .extract(&file)
        .with_context(|| format!("failed to extract {}", path.display()))
}

/// Encode `input` and write it; returns the path written.
pub fn export_file(
    format: ExportFormat,
    input: &Path,
    output: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let summary = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let doc = encode_document(format, &summary)?;
    let output = output.unwrap_or_else(|| PathBuf::from(&doc.file_name));
    fs::write(&output, &doc.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote {} ({} bytes)", output.display(), doc.bytes.len());
    Ok(output)
}

async fn summarize_files(
    config: &Config,
    files: &[PathBuf],
    manual_text: &str,
    instructions: &[String],
    custom: Option<&str>,
) -> anyhow::Result<String> {
    let extractor = TextExtractor::from_config(&config.ocr);
    let mut extracted = Vec::with_capacity(files.len());
    for path in files {
        extracted.push(extract_file(&extractor, path, None)?);
    }

    let text = assemble_text(&extracted, manual_text);
    require_text(&text)?;

    let summarizer = match Summarizer::from_config(&config.llm) {
        Ok(s) => s,
        Err(e) => bail!("cannot summarize: {e}"),
    };
    let merged = merge_instructions(instructions, custom);
    let summary = summarizer
        .summarize(&text, effective_instruction(&merged))
        .await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["recap-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_summarize_flags() {
        let cli = Cli::try_parse_from([
            "recap-server",
            "summarize",
            "a.txt",
            "b.pdf",
            "--instruction",
            "Detailed summary",
            "--instruction",
            "Extract only key points",
            "--custom",
            "Use German",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Summarize {
                files,
                instructions,
                custom,
                text,
            }) => {
                assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b.pdf")]);
                assert_eq!(instructions, vec!["Detailed summary", "Extract only key points"]);
                assert_eq!(custom.as_deref(), Some("Use German"));
                assert!(text.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_export_format() {
        assert!(Cli::try_parse_from(["recap-server", "export", "odt", "notes.txt"]).is_err());
        let cli = Cli::try_parse_from(["recap-server", "export", "markdown", "notes.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Export { format: ExportFormat::Markdown, .. })
        ));
    }

    #[test]
    fn extracts_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello\nworld").unwrap();
        let text = extract_file(&TextExtractor::default(), &path, None).unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[test]
    fn export_writes_to_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("summary.txt");
        fs::write(&input, "Decisions").unwrap();
        let output = dir.path().join("out.md");

        let written = export_file(ExportFormat::Markdown, &input, Some(output.clone())).unwrap();
        assert_eq!(written, output);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# Summary\n\nDecisions");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_file(ExportFormat::Text, &dir.path().join("nope.txt"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
