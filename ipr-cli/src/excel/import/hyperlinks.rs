//! Hyperlink recovery for OOXML workbooks
//!
//! calamine exposes cell values only, so hyperlink targets are read from the
//! package directly: the first `<sheet>` in `xl/workbook.xml` is resolved
//! through the workbook relationships to its worksheet part, whose
//! `<hyperlink>` elements point at external relationship targets.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// A hyperlink target covering an inclusive, zero-based cell rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct HyperlinkRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
    pub target: String,
}

impl HyperlinkRange {
    fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }
}

/// Hyperlink ranges of one sheet, in document order
///
/// Ranges are kept as declared so a single `ref` spanning the whole sheet
/// costs one entry. When ranges overlap the later declaration wins.
#[derive(Debug, Default, Clone)]
pub struct HyperlinkMap {
    ranges: Vec<HyperlinkRange>,
}

impl HyperlinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, range: HyperlinkRange) {
        self.ranges.push(range);
    }

    /// Target of the hyperlink covering zero-based `(row, col)`
    pub fn get(&self, row: u32, col: u32) -> Option<&str> {
        self.ranges
            .iter()
            .rev()
            .find(|range| range.contains(row, col))
            .map(|range| range.target.as_str())
    }

    /// Number of declared ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }
}

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// Read hyperlinks of the first worksheet in an OOXML package
pub fn read_first_sheet_hyperlinks(bytes: &[u8]) -> Result<HyperlinkMap> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("Workbook is not a zip package")?;

    let workbook = read_part(&mut archive, WORKBOOK_PART)?;
    let Some(sheet_rel_id) = first_sheet_relationship(&workbook)? else {
        return Ok(HyperlinkMap::new());
    };

    let workbook_rels = read_part(&mut archive, WORKBOOK_RELS_PART)?;
    let relationships = parse_relationships(&workbook_rels)?;
    let target = relationships
        .get(&sheet_rel_id)
        .with_context(|| format!("Sheet relationship '{}' not found", sheet_rel_id))?;
    let sheet_part = resolve_part_path("xl", target);

    let sheet_xml = read_part(&mut archive, &sheet_part)?;
    let links = parse_sheet_hyperlinks(&sheet_xml)?;
    if links.is_empty() {
        return Ok(HyperlinkMap::new());
    }

    let sheet_rels = match read_part(&mut archive, &rels_path_for(&sheet_part)) {
        Ok(xml) => parse_relationships(&xml)?,
        Err(e) => {
            log::debug!("No relationships for {}: {:#}", sheet_part, e);
            HashMap::new()
        }
    };

    let mut map = HyperlinkMap::new();
    for link in links {
        // Internal links (location only) do not point at a document
        let Some(rel_id) = link.rel_id else { continue };
        let Some(base) = sheet_rels.get(&rel_id) else {
            log::warn!("Hyperlink {} references unknown relationship {}", link.cell_ref, rel_id);
            continue;
        };

        let target = match &link.location {
            Some(location) if !location.is_empty() => format!("{}#{}", base, location),
            _ => base.clone(),
        };

        match parse_range(&link.cell_ref) {
            Some(((first_row, first_col), (last_row, last_col))) => map.insert(HyperlinkRange {
                first_row,
                first_col,
                last_row,
                last_col,
                target,
            }),
            None => log::warn!("Ignoring hyperlink with invalid range '{}'", link.cell_ref),
        }
    }

    log::debug!("Recovered {} hyperlink ranges from {}", map.len(), sheet_part);
    Ok(map)
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .with_context(|| format!("Missing package part {}", name))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .with_context(|| format!("Failed to read package part {}", name))?;
    Ok(xml)
}

/// Attribute value by local name, unescaped
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.context("Malformed XML attribute")?;
        if attr.key.local_name().as_ref() == name {
            let raw = std::str::from_utf8(&attr.value).context("Attribute is not UTF-8")?;
            let value = quick_xml::escape::unescape(raw).context("Bad XML escape")?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Relationship id of the first `<sheet>` in workbook order
fn first_sheet_relationship(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event().context("Failed to parse workbook.xml")? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                return attribute(&e, b"id");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Relationship id to target
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event().context("Failed to parse relationships")? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attribute(&e, b"Id")?, attribute(&e, b"Target")?)
                {
                    relationships.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}

#[derive(Debug, PartialEq)]
struct SheetHyperlink {
    cell_ref: String,
    rel_id: Option<String>,
    location: Option<String>,
}

fn parse_sheet_hyperlinks(xml: &str) -> Result<Vec<SheetHyperlink>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut links = Vec::new();

    loop {
        match reader.read_event().context("Failed to parse worksheet")? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"hyperlink" => {
                let Some(cell_ref) = attribute(&e, b"ref")? else { continue };
                links.push(SheetHyperlink {
                    cell_ref,
                    rel_id: attribute(&e, b"id")?,
                    location: attribute(&e, b"location")?,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(links)
}

/// Resolve a relationship target against the directory of its source part
fn resolve_part_path(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// `xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`
fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Parse an A1 reference into zero-based `(row, column)`
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let cell_ref = cell_ref.trim().replace('$', "");
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// Normalized top-left and bottom-right corners of `A1` or `A1:B2`
fn parse_range(range: &str) -> Option<((u32, u32), (u32, u32))> {
    let (start, end) = match range.split_once(':') {
        Some((a, b)) => (parse_cell_ref(a)?, parse_cell_ref(b)?),
        None => {
            let cell = parse_cell_ref(range)?;
            (cell, cell)
        }
    };

    let (r1, c1) = start;
    let (r2, c2) = end;
    Some(((r1.min(r2), c1.min(c2)), (r1.max(r2), c1.max(c2))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("C3"), Some((2, 2)));
        assert_eq!(parse_cell_ref("AA10"), Some((9, 26)));
        assert_eq!(parse_cell_ref("$B$2"), Some((1, 1)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("12"), None);
        assert_eq!(parse_cell_ref(""), None);
    }

    #[test]
    fn test_parse_cell_ref_rejects_overlong_columns() {
        assert_eq!(parse_cell_ref("XFD1048576"), Some((1_048_575, 16_383)));
        assert_eq!(parse_cell_ref("ZZZZZZZ1"), None);
        assert_eq!(parse_cell_ref("AAAAAAAAAAAAAAAAAAAA1"), None);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("B2"), Some(((1, 1), (1, 1))));
        assert_eq!(parse_range("A1:B2"), Some(((0, 0), (1, 1))));
        assert_eq!(parse_range("B2:A1"), Some(((0, 0), (1, 1))));
        assert_eq!(parse_range("nonsense"), None);
        assert_eq!(parse_range("A1:nonsense"), None);
    }

    #[test]
    fn test_whole_sheet_range_is_one_entry() {
        let ((first_row, first_col), (last_row, last_col)) =
            parse_range("A1:XFD1048576").unwrap();
        let mut map = HyperlinkMap::new();
        map.insert(HyperlinkRange {
            first_row,
            first_col,
            last_row,
            last_col,
            target: "https://drive.example/all".to_string(),
        });

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(0, 0), Some("https://drive.example/all"));
        assert_eq!(map.get(1_048_575, 16_383), Some("https://drive.example/all"));
        assert_eq!(map.get(1_048_576, 0), None);
    }

    #[test]
    fn test_later_range_wins_on_overlap() {
        let mut map = HyperlinkMap::new();
        map.insert(HyperlinkRange {
            first_row: 0,
            first_col: 0,
            last_row: 9,
            last_col: 9,
            target: "outer".to_string(),
        });
        map.insert(HyperlinkRange {
            first_row: 2,
            first_col: 2,
            last_row: 2,
            last_col: 2,
            target: "inner".to_string(),
        });

        assert_eq!(map.get(2, 2), Some("inner"));
        assert_eq!(map.get(3, 3), Some("outer"));
        assert_eq!(map.get(10, 0), None);
    }

    #[test]
    fn test_resolve_part_path() {
        assert_eq!(resolve_part_path("xl", "worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_part_path("xl", "/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
        assert_eq!(resolve_part_path("xl/worksheets", "../media/a.png"), "xl/media/a.png");
        assert_eq!(rels_path_for("xl/worksheets/sheet1.xml"), "xl/worksheets/_rels/sheet1.xml.rels");
    }

    #[test]
    fn test_first_sheet_relationship() {
        let xml = r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
            <sheets>
                <sheet name="Register" sheetId="1" r:id="rId3"/>
                <sheet name="Other" sheetId="2" r:id="rId1"/>
            </sheets>
        </workbook>"#;
        assert_eq!(first_sheet_relationship(xml).unwrap(), Some("rId3".to_string()));
    }

    #[test]
    fn test_parse_relationships_and_hyperlinks() {
        let rels = r#"<Relationships>
            <Relationship Id="rId1" Type="hyperlink" Target="https://drive.example/a?x=1&amp;y=2" TargetMode="External"/>
        </Relationships>"#;
        let map = parse_relationships(rels).unwrap();
        assert_eq!(map.get("rId1").unwrap(), "https://drive.example/a?x=1&y=2");

        let sheet = r#"<worksheet xmlns:r="r"><hyperlinks>
            <hyperlink ref="C3" r:id="rId1"/>
            <hyperlink ref="D4" location="Sheet2!A1"/>
        </hyperlinks></worksheet>"#;
        let links = parse_sheet_hyperlinks(sheet).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel_id.as_deref(), Some("rId1"));
        assert_eq!(links[1].rel_id, None);
        assert_eq!(links[1].location.as_deref(), Some("Sheet2!A1"));
    }

    #[test]
    fn test_not_a_package() {
        assert!(read_first_sheet_hyperlinks(b"plain text").is_err());
    }
}
