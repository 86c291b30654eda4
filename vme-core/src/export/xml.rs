//! XML document shape for exported metadata.
//!
//! The XML layout differs from JSON in element naming: sections are
//! `<FileInfo>`, `<MovieInfo>` and `<TrackInfo>`, and list items are repeated
//! `<tag>` and `<stream>` elements rather than a wrapping array.
//!
//! Values are written with tab, newline and carriage return as character
//! references and read back without any whitespace trimming, so every value
//! survives a round trip byte for byte. Characters XML 1.0 cannot carry at
//! all (most C0 controls, U+FFFE, U+FFFF) are rejected on export.

use crate::error::{CoreError, CoreResult};
use crate::metadata::{FileInfo, MediaMetadata, MetadataTag, MovieInfo, StreamSummary, TrackInfo};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fmt::Display;

pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const ROOT: &str = "MediaMetadata";

fn serialization_error(err: impl Display) -> CoreError {
    CoreError::Serialization(err.to_string())
}

// ============================================================================
// WRITING
// ============================================================================

pub(crate) fn to_xml(metadata: &MediaMetadata) -> CoreResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    open(&mut writer, ROOT)?;

    let file = &metadata.file_info;
    open(&mut writer, "FileInfo")?;
    leaf(&mut writer, "filename", &file.filename)?;
    leaf(&mut writer, "size", &file.size)?;
    leaf(&mut writer, "format", &file.format)?;
    close(&mut writer, "FileInfo")?;

    if let Some(movie) = &metadata.movie_info {
        open(&mut writer, "MovieInfo")?;
        leaf(&mut writer, "title", &movie.title)?;
        leaf(&mut writer, "duration", &movie.duration)?;
        for tag in &movie.tags {
            open(&mut writer, "tag")?;
            leaf(&mut writer, "name", &tag.name)?;
            leaf(&mut writer, "value", &tag.value)?;
            close(&mut writer, "tag")?;
        }
        close(&mut writer, "MovieInfo")?;
    }

    if let Some(track) = &metadata.track_info {
        open(&mut writer, "TrackInfo")?;
        leaf(&mut writer, "bitRate", &track.bit_rate)?;
        for stream in &track.streams {
            open(&mut writer, "stream")?;
            leaf(&mut writer, "index", &stream.index.to_string())?;
            leaf(&mut writer, "type", &stream.kind)?;
            leaf(&mut writer, "codec", &stream.codec)?;
            leaf(&mut writer, "resolution", &stream.resolution)?;
            close(&mut writer, "stream")?;
        }
        close(&mut writer, "TrackInfo")?;
    }

    close(&mut writer, ROOT)?;

    let body = String::from_utf8(writer.into_inner()).map_err(serialization_error)?;
    Ok(format!("{XML_DECLARATION}\n{body}\n"))
}

fn open(writer: &mut Writer<Vec<u8>>, name: &str) -> CoreResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(serialization_error)
}

fn close(writer: &mut Writer<Vec<u8>>, name: &str) -> CoreResult<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(serialization_error)
}

/// Writes `<name>value</name>` on one line. The text event is written even
/// when empty so the closing tag stays on the same line.
fn leaf(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> CoreResult<()> {
    let escaped = escape_value(name, value)?;
    open(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::from_escaped(escaped)))
        .map_err(serialization_error)?;
    close(writer, name)
}

/// Escapes markup and whitespace controls; rejects characters outside the
/// XML 1.0 `Char` production.
fn escape_value(name: &str, value: &str) -> CoreResult<String> {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            c if is_xml_char(c) => escaped.push(c),
            c => {
                return Err(CoreError::Serialization(format!(
                    "<{name}> contains character U+{:04X}, which XML 1.0 cannot represent",
                    u32::from(c)
                )));
            }
        }
    }
    Ok(escaped)
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

// ============================================================================
// READING
// ============================================================================

/// Minimal element tree: the text of leaves is kept exactly as written.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn required(&self, name: &str) -> CoreResult<&Element> {
        self.child(name).ok_or_else(|| {
            CoreError::Serialization(format!("<{}> is missing <{name}>", self.name))
        })
    }

    fn text_of(&self, name: &str) -> CoreResult<String> {
        self.required(name).map(|child| child.text.clone())
    }
}

pub(crate) fn from_xml(text: &str) -> CoreResult<MediaMetadata> {
    let root = parse_tree(text)?;
    if root.name != ROOT {
        return Err(CoreError::Serialization(format!(
            "expected <{ROOT}> root element, found <{}>",
            root.name
        )));
    }

    let file = root.required("FileInfo")?;
    let file_info = FileInfo {
        filename: file.text_of("filename")?,
        size: file.text_of("size")?,
        format: file.text_of("format")?,
    };

    let movie_info = root
        .child("MovieInfo")
        .map(|movie| -> CoreResult<MovieInfo> {
            let tags = movie
                .children_named("tag")
                .map(|tag| Ok(MetadataTag::new(tag.text_of("name")?, tag.text_of("value")?)))
                .collect::<CoreResult<Vec<_>>>()?;
            Ok(MovieInfo {
                title: movie.text_of("title")?,
                duration: movie.text_of("duration")?,
                tags,
            })
        })
        .transpose()?;

    let track_info = root
        .child("TrackInfo")
        .map(|track| -> CoreResult<TrackInfo> {
            let streams = track
                .children_named("stream")
                .map(read_stream)
                .collect::<CoreResult<Vec<_>>>()?;
            Ok(TrackInfo {
                bit_rate: track.text_of("bitRate")?,
                streams,
            })
        })
        .transpose()?;

    Ok(MediaMetadata {
        file_info,
        movie_info,
        track_info,
    })
}

fn read_stream(stream: &Element) -> CoreResult<StreamSummary> {
    let index = stream.text_of("index")?;
    let index = index.trim().parse::<usize>().map_err(|e| {
        CoreError::Serialization(format!("invalid stream index '{index}': {e}"))
    })?;
    Ok(StreamSummary {
        index,
        kind: stream.text_of("type")?,
        codec: stream.text_of("codec")?,
        resolution: stream.text_of("resolution")?,
    })
}

fn element_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

fn parse_tree(text: &str) -> CoreResult<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().map_err(serialization_error)? {
            Event::Start(start) => stack.push(Element {
                name: element_name(start.name().as_ref()),
                ..Element::default()
            }),
            Event::Empty(empty) => {
                let element = Element {
                    name: element_name(empty.name().as_ref()),
                    ..Element::default()
                };
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text.unescape().map_err(serialization_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    CoreError::Serialization("unbalanced closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CoreError::Serialization("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| CoreError::Serialization("document has no root element".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> CoreResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(CoreError::Serialization(
                "document has more than one root element".to_string(),
            ));
        }
    }
    Ok(())
}
