//! Header-to-column resolution for the patent register sheet
//!
//! Each semantic field has a list of accepted header spellings and a fixed
//! fallback column. Resolution runs once per import against the header row.

use std::collections::HashMap;

use calamine::Data;

use super::cells::cell_text;

/// Semantic fields read from the register sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetField {
    ApplicationNumber,
    Title,
    MainInventor,
    OtherInventors,
    Applicants,
    FiledDate,
    PublishedDate,
    GrantDate,
    Status,
    RenewalDueDate,
    PatentNumber,
    PatentCertificate,
    Remarks,
    IpAgent,
    Details,
}

impl SheetField {
    pub const ALL: [SheetField; 15] = [
        SheetField::ApplicationNumber,
        SheetField::Title,
        SheetField::MainInventor,
        SheetField::OtherInventors,
        SheetField::Applicants,
        SheetField::FiledDate,
        SheetField::PublishedDate,
        SheetField::GrantDate,
        SheetField::Status,
        SheetField::RenewalDueDate,
        SheetField::PatentNumber,
        SheetField::PatentCertificate,
        SheetField::Remarks,
        SheetField::IpAgent,
        SheetField::Details,
    ];

    /// Accepted header spellings, normalised, in priority order
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            SheetField::ApplicationNumber => &["application no", "application number"],
            SheetField::Title => &["invention title"],
            SheetField::MainInventor => &["main innovator"],
            SheetField::OtherInventors => &["other innovators"],
            SheetField::Applicants => &["applicant"],
            SheetField::FiledDate => &["application date"],
            SheetField::PublishedDate => &["publication date"],
            SheetField::GrantDate => &["grant date"],
            SheetField::Status => &["status"],
            // "Renewal\nDate" normalises to this as well
            SheetField::RenewalDueDate => &["renewal date"],
            SheetField::PatentNumber => &["patent number"],
            SheetField::PatentCertificate => &["patent certificate view/download"],
            SheetField::Remarks => &["remarks"],
            SheetField::IpAgent => &["ip agent"],
            SheetField::Details => &["details of ip in brief"],
        }
    }

    /// Zero-based column used when no header matches
    pub fn fallback_column(self) -> usize {
        match self {
            SheetField::ApplicationNumber => 2,
            SheetField::Title => 10,
            SheetField::MainInventor => 13,
            SheetField::OtherInventors => 14,
            SheetField::Applicants => 12,
            SheetField::FiledDate => 3,
            SheetField::PublishedDate => 5,
            SheetField::GrantDate => 8,
            SheetField::Status => 4,
            SheetField::RenewalDueDate => 9,
            SheetField::PatentNumber => 6,
            SheetField::PatentCertificate => 7,
            SheetField::Remarks => 16,
            SheetField::IpAgent => 15,
            SheetField::Details => 11,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Lower-case, trim, and collapse internal whitespace (line breaks included)
pub fn normalize_header(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolved column index for every sheet field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [usize; SheetField::ALL.len()],
}

impl ColumnMap {
    /// Resolve columns from the header row
    pub fn resolve(header: &[Data]) -> Self {
        let names: Vec<String> = (0..header.len()).map(|c| cell_text(header, c)).collect();
        Self::from_header_names(&names)
    }

    pub fn from_header_names<S: AsRef<str>>(names: &[S]) -> Self {
        // Later duplicates overwrite earlier ones
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            by_name.insert(normalize_header(name.as_ref()), idx);
        }

        let mut columns = [0usize; SheetField::ALL.len()];
        for field in SheetField::ALL {
            let found = field
                .aliases()
                .iter()
                .find_map(|alias| by_name.get(*alias).copied());

            columns[field.index()] = match found {
                Some(col) => col,
                None => {
                    log::debug!(
                        "No header for {:?}, using fallback column {}",
                        field,
                        field.fallback_column()
                    );
                    field.fallback_column()
                }
            };
        }

        Self { columns }
    }

    pub fn column(&self, field: SheetField) -> usize {
        self.columns[field.index()]
    }
}

impl Default for ColumnMap {
    /// Every field at its fallback column
    fn default() -> Self {
        Self::from_header_names::<&str>(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Application No "), "application no");
        assert_eq!(normalize_header("Renewal\nDate"), "renewal date");
        assert_eq!(normalize_header("Renewal \r\n Date"), "renewal date");
    }

    #[test]
    fn test_fallbacks_without_headers() {
        let map = ColumnMap::default();
        for field in SheetField::ALL {
            assert_eq!(map.column(field), field.fallback_column());
        }
    }

    #[test]
    fn test_headers_override_fallbacks() {
        let map = ColumnMap::from_header_names(&[
            "Invention Title",
            "Application Number",
            "Renewal\nDate",
            "STATUS",
        ]);

        assert_eq!(map.column(SheetField::Title), 0);
        assert_eq!(map.column(SheetField::ApplicationNumber), 1);
        assert_eq!(map.column(SheetField::RenewalDueDate), 2);
        assert_eq!(map.column(SheetField::Status), 3);
        assert_eq!(map.column(SheetField::GrantDate), 8);
    }

    #[test]
    fn test_first_alias_wins() {
        let map = ColumnMap::from_header_names(&["Application Number", "Application No"]);
        assert_eq!(map.column(SheetField::ApplicationNumber), 1);
    }

    #[test]
    fn test_rightmost_duplicate_wins() {
        let map = ColumnMap::from_header_names(&["Status", "Remarks", "Status"]);
        assert_eq!(map.column(SheetField::Status), 2);
    }

    #[test]
    fn test_resolve_from_cells() {
        let header = vec![
            Data::String("Sl No".to_string()),
            Data::Empty,
            Data::String("Application No".to_string()),
            Data::Float(2024.0),
        ];
        let map = ColumnMap::resolve(&header);
        assert_eq!(map.column(SheetField::ApplicationNumber), 2);
    }
}
