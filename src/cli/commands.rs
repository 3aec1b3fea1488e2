use std::io::Read;

use clap::{Parser, Subcommand};

use froglet::{Encoding, FrogClient, OutputFormat, Record};

#[derive(Parser)]
#[command(name = "froglet")]
#[command(about = "Command-line client for the Frog/Tadpole NLP server")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Analyze a sentence
    froglet process "Dit is een test ."

    # Analyze stdin, print as JSON
    cat input.txt | froglet process --format json

    # Keep only the five base columns
    froglet --short process "Dit is een test ."

    # Align the analysis with your own tokenization
    froglet align "Dit is een test ."

    # Talk to a remote server with latin-1 output
    froglet --host tagger.example.org --port 12000 --encoding latin-1 process "..."
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port
    #[arg(long, default_value = "12345")]
    pub port: u16,

    /// Connect/read/write timeout in seconds
    #[arg(long, default_value = "120")]
    pub timeout: u64,

    /// Server text encoding (utf-8 or latin-1)
    #[arg(long, default_value = "utf-8")]
    pub encoding: Encoding,

    /// Expect only the five base columns from the server
    #[arg(long)]
    pub short: bool,

    /// Old Frog/Tadpole server without the EOT end-of-transmission marker
    #[arg(long)]
    pub legacy: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send text to the server and print the analysis
    Process {
        /// Text to analyze; read from stdin when omitted
        text: Option<String>,

        /// Output format: plain, dict or json
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    /// Analyze text and align the result with its space-split tokens
    Align {
        /// Text to analyze; read from stdin when omitted
        text: Option<String>,
    },
}

pub fn process(client: &mut FrogClient, text: Option<String>, format: OutputFormat) -> anyhow::Result<()> {
    let text = resolve_input(text)?;
    let records = client.process(&text)?;
    match format {
        OutputFormat::Plain => {
            for record in &records {
                println!("{}", render_plain(record));
            }
        }
        OutputFormat::Dict => {
            println!("{}", serde_json::to_string_pretty(&froglet::keyed_map(&records))?);
        }
        OutputFormat::Json => {
            println!("{}", froglet::to_json(&records)?);
        }
    }
    Ok(())
}

pub fn align(client: &mut FrogClient, text: Option<String>) -> anyhow::Result<()> {
    let text = resolve_input(text)?;
    let input_words: Vec<String> = text.trim().split(' ').map(str::to_string).collect();
    let aligned = client.process_aligned(&text)?;
    for (word, record) in input_words.iter().zip(aligned) {
        match record {
            Record::Boundary => println!("{word}\t-"),
            Record::Token(token) => println!("{word}\t{}\t{}\t{}", token.word, token.lemma, token.pos),
        }
    }
    Ok(())
}

fn resolve_input(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn render_plain(record: &Record) -> String {
    match record {
        Record::Boundary => String::new(),
        Record::Token(token) => {
            let mut line = format!(
                "{}\t{}\t{}\t{}\t{}",
                token.token_number, token.word, token.lemma, token.morph, token.pos
            );
            if let Some(a) = &token.annotations {
                let opt = |s: &Option<String>| s.clone().unwrap_or_default();
                line.push_str(&format!(
                    "\t{}\t{}\t{}\t{}\t{}",
                    a.confidence.map(|c| c.to_string()).unwrap_or_default(),
                    opt(&a.named_entity),
                    opt(&a.chunk),
                    a.head.map(|h| h.to_string()).unwrap_or_default(),
                    opt(&a.dependency),
                ));
            }
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use froglet::Token;

    #[test]
    fn test_render_plain_short() {
        let record = Record::Token(Token {
            token_number: 2,
            word: "is".into(),
            lemma: "zijn".into(),
            morph: "[zijn]".into(),
            pos: "WW".into(),
            annotations: None,
        });
        assert_eq!(render_plain(&record), "2\tis\tzijn\t[zijn]\tWW");
    }

    #[test]
    fn test_render_plain_boundary_is_blank_line() {
        assert_eq!(render_plain(&Record::Boundary), "");
    }
}
