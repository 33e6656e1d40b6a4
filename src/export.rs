use std::fs::File;
use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use url::Url;

use crate::types::CatalogEntry;

const CSV_HEADERS: [&str; 6] = ["name", "schema", "url", "source", "price", "item_type"];

/// Flat, stable field order for the presentation layer and file exports.
#[derive(Debug, Clone, Serialize)]
struct ExportRecord {
    name: String,
    schema: String,
    url: String,
    source: String,
    price: String,
    item_type: String,
}

fn entry_to_record(entry: &CatalogEntry) -> ExportRecord {
    ExportRecord {
        name: entry.name.clone(),
        schema: entry.schema.label().to_string(),
        url: entry.url.clone(),
        source: entry.source.label().to_string(),
        price: entry.price.clone().unwrap_or_else(|| "N/A".to_string()),
        item_type: entry.item_type.clone().unwrap_or_default(),
    }
}

pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    fn new(output_path: &str) -> io::Result<Self> {
        let file = File::create(output_path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADERS)?;
        Ok(Self { writer })
    }

    fn write_entry(&mut self, entry: &CatalogEntry) -> io::Result<()> {
        let rec = entry_to_record(entry);
        self.writer.write_record([
            rec.name,
            rec.schema,
            rec.url,
            rec.source,
            rec.price,
            rec.item_type,
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub struct JsonSink {
    file: File,
    first: bool,
    closed: bool,
}

impl JsonSink {
    fn new(output_path: &str) -> io::Result<Self> {
        let mut file = File::create(output_path)?;
        file.write_all(b"[\n")?;
        Ok(Self {
            file,
            first: true,
            closed: false,
        })
    }

    fn write_entry(&mut self, entry: &CatalogEntry) -> io::Result<()> {
        if !self.first {
            self.file.write_all(b",\n")?;
        }
        self.first = false;
        serde_json::to_writer(&mut self.file, &entry_to_record(entry)).map_err(io::Error::other)?;
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        if !self.closed {
            if self.first {
                self.file.write_all(b"]\n")?;
            } else {
                self.file.write_all(b"\n]\n")?;
            }
            self.closed = true;
        }
        self.file.flush()
    }
}

impl Drop for JsonSink {
    fn drop(&mut self) {
        let _ = self.finalize();
    }
}

pub enum OutputSink {
    Csv(CsvSink),
    Json(JsonSink),
}

impl OutputSink {
    pub fn new(output_path: &str, format: DataFormat) -> io::Result<Self> {
        match format {
            DataFormat::Csv => Ok(OutputSink::Csv(CsvSink::new(output_path)?)),
            DataFormat::Json => Ok(OutputSink::Json(JsonSink::new(output_path)?)),
        }
    }

    pub fn write_entry(&mut self, entry: &CatalogEntry) -> io::Result<()> {
        match self {
            OutputSink::Csv(sink) => sink.write_entry(entry),
            OutputSink::Json(sink) => sink.write_entry(entry),
        }
    }

    pub fn finalize(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Csv(sink) => sink.flush(),
            OutputSink::Json(sink) => sink.finalize(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

pub fn detect_data_format(path: &str, fallback: DataFormat) -> DataFormat {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".json") {
        DataFormat::Json
    } else if lower.ends_with(".csv") {
        DataFormat::Csv
    } else {
        fallback
    }
}

pub fn default_output_path(domain: &str, format: DataFormat) -> String {
    let host = Url::parse(domain)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "catalog".to_string());
    let host = host
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    let ts = Utc::now().format("%Y%m%d_%H%M%S");
    match format {
        DataFormat::Csv => format!("{host}_catalog_{ts}.csv"),
        DataFormat::Json => format!("{host}_catalog_{ts}.json"),
    }
}
