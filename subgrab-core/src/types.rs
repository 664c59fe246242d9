/// One row of a subtitle search, flattened from the API's `data[].attributes`.
///
/// Only the first file of a record is kept; `file_id` is `None` when the record
/// has no files, which makes it non-downloadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub release_title: String,
    pub language_code: String,
    pub year: Option<i64>,
    pub download_count: u64,
    pub file_id: Option<u64>,
}

impl SearchResultItem {
    /// Text shown for this item at `index` (0-based) in the results panel.
    ///
    /// Format: `1. [en] Inception.2010.BluRay (2010) - 500 downloads`.
    pub fn row_label(&self, index: usize) -> String {
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        format!(
            "{}. [{}] {} ({}) - {} downloads",
            index + 1,
            self.language_code,
            self.release_title,
            year,
            self.download_count
        )
    }

    /// Flattens one `data[]` element, defaulting absent fields.
    pub(crate) fn from_record(record: crate::dto::SubtitleRecord) -> Self {
        let attrs = record.attributes;
        let year = attrs
            .year
            .or_else(|| attrs.feature_details.as_ref().and_then(|f| f.year));
        Self {
            release_title: attrs.release.unwrap_or_else(|| "Unknown release".to_owned()),
            language_code: attrs.language.unwrap_or_else(|| "??".to_owned()),
            year,
            download_count: attrs.download_count.or(attrs.downloads).unwrap_or(0),
            file_id: attrs.files.first().and_then(|f| f.file_id),
        }
    }
}

/// Parameters of `GET /subtitles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub language: String,
}

/// A resolved, signed download location plus the file name to save under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub url: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::SubtitleRecord;

    fn record(json: &str) -> SubtitleRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn row_label_matches_display_format() {
        let item = SearchResultItem {
            release_title: "Inception.2010.BluRay".to_owned(),
            language_code: "en".to_owned(),
            year: Some(2010),
            download_count: 500,
            file_id: Some(123),
        };
        assert_eq!(
            item.row_label(0),
            "1. [en] Inception.2010.BluRay (2010) - 500 downloads"
        );
    }

    #[test]
    fn missing_year_renders_empty_parens() {
        let item = SearchResultItem {
            release_title: "Heat".to_owned(),
            language_code: "fr".to_owned(),
            year: None,
            download_count: 3,
            file_id: None,
        };
        assert_eq!(item.row_label(4), "5. [fr] Heat () - 3 downloads");
    }

    #[test]
    fn record_defaults_fill_missing_fields() {
        let item = SearchResultItem::from_record(record(r#"{"attributes":{}}"#));
        assert_eq!(item.release_title, "Unknown release");
        assert_eq!(item.language_code, "??");
        assert_eq!(item.year, None);
        assert_eq!(item.download_count, 0);
        assert_eq!(item.file_id, None);
    }

    #[test]
    fn downloads_is_used_when_download_count_is_absent() {
        let item = SearchResultItem::from_record(record(r#"{"attributes":{"downloads":42}}"#));
        assert_eq!(item.download_count, 42);

        let both = SearchResultItem::from_record(record(
            r#"{"attributes":{"download_count":7,"downloads":42}}"#,
        ));
        assert_eq!(both.download_count, 7);
    }

    #[test]
    fn only_the_first_file_is_kept() {
        let item = SearchResultItem::from_record(record(
            r#"{"attributes":{"files":[{"file_id":11},{"file_id":22}]}}"#,
        ));
        assert_eq!(item.file_id, Some(11));
    }

    #[test]
    fn year_falls_back_to_feature_details() {
        let item = SearchResultItem::from_record(record(
            r#"{"attributes":{"feature_details":{"year":1999}}}"#,
        ));
        assert_eq!(item.year, Some(1999));
    }
}
