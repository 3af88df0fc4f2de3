use std::fs;
use std::path::{Path, PathBuf};

use itemcodec::codec::{AttributeValue, Item, Payload};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// Path to a JSON object mapping attribute names to attribute values.
	pub path: PathBuf,
	/// Print the report as JSON.
	#[arg(long)]
	pub json: bool,
	/// Fail when any attribute has more than one populated variant.
	#[arg(long)]
	pub strict: bool,
}

#[derive(Serialize)]
struct Report<'a> {
	path: String,
	attributes: Vec<AttributeRow<'a>>,
	malformed: usize,
}

#[derive(Serialize)]
struct AttributeRow<'a> {
	name: &'a str,
	tag: Option<&'static str>,
	populated: Vec<&'static str>,
	summary: String,
	malformed: bool,
}

impl<'a> AttributeRow<'a> {
	fn new(name: &'a str, value: &AttributeValue) -> Self {
		let populated: Vec<_> = value.payloads().map(|payload| payload.tag().as_str()).collect();
		let extracted = value.extract();
		Self {
			name,
			tag: extracted.map(|payload| payload.tag().as_str()),
			malformed: populated.len() > 1,
			populated,
			summary: extracted.map_or_else(|| "-".to_owned(), summarize),
		}
	}
}

/// Print the extracted variant and a payload summary for each attribute of an item file.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, strict } = args;

	let item = read_item(&path)?;
	debug!(path = %path.display(), attributes = item.len(), "item loaded");

	let rows: Vec<_> = item.iter().map(|(name, value)| AttributeRow::new(name, value)).collect();
	let malformed: Vec<&str> = rows.iter().filter(|row| row.malformed).map(|row| row.name).collect();
	for row in rows.iter().filter(|row| row.malformed) {
		warn!(attribute = row.name, populated = ?row.populated, "attribute has several populated variants");
	}
	if strict && !malformed.is_empty() {
		return Err(CliError::Malformed {
			names: malformed.join(", "),
		});
	}

	let report = Report {
		path: path.display().to_string(),
		malformed: malformed.len(),
		attributes: rows,
	};
	if json {
		println!("{}", serde_json::to_string_pretty(&report).map_err(CliError::Render)?);
	} else {
		print_text(&report);
	}
	Ok(())
}

fn read_item(path: &Path) -> Result<Item> {
	let text = fs::read_to_string(path).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	serde_json::from_str(&text).map_err(|source| CliError::Json {
		path: path.to_path_buf(),
		source,
	})
}

fn print_text(report: &Report<'_>) {
	println!("path: {}", report.path);
	println!("attributes: {}", report.attributes.len());
	for row in &report.attributes {
		let tag = row.tag.unwrap_or("-");
		if row.malformed {
			println!("  {}: {} {} (malformed: {})", row.name, tag, row.summary, row.populated.join(","));
		} else {
			println!("  {}: {} {}", row.name, tag, row.summary);
		}
	}
	println!("malformed: {}", report.malformed);
}

fn summarize(payload: Payload<'_>) -> String {
	match payload {
		Payload::S(text) => format!("{text:?}"),
		Payload::N(text) => text.to_owned(),
		Payload::Bool(flag) | Payload::Null(flag) => flag.to_string(),
		Payload::B(bytes) => format!("{} bytes", bytes.len()),
		Payload::Ss(items) => format!("{} strings", items.len()),
		Payload::Ns(items) => format!("[{}]", items.join(", ")),
		Payload::Bs(blocks) => format!("{} blocks", blocks.len()),
		Payload::L(items) => format!("{} elements", items.len()),
		Payload::M(entries) => format!("{} entries", entries.len()),
	}
}
