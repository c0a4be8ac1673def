/// One normalized candidate record. All fields are plain strings; missing
/// values in the raw data are normalized to "" at load time and entries are
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub twitter_handle: String,
    pub twitter_link: String,
    pub office_level: String,
    pub office_sought: String,
}

/// The sortable columns. `twitter_link` is only used for rendering and is
/// deliberately not representable here, so sorting on it cannot happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    OfficeSought,
    OfficeLevel,
    TwitterHandle,
}

/// Column order as rendered, left to right.
pub const COLUMNS: [SortKey; 4] = [
    SortKey::Name,
    SortKey::OfficeSought,
    SortKey::OfficeLevel,
    SortKey::TwitterHandle,
];

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Candidate Name",
            SortKey::OfficeSought => "Office Sought",
            SortKey::OfficeLevel => "Office Level",
            SortKey::TwitterHandle => "Tweet your thanks",
        }
    }
}

impl Entry {
    pub fn field(&self, key: SortKey) -> &str {
        match key {
            SortKey::Name => &self.name,
            SortKey::OfficeSought => &self.office_sought,
            SortKey::OfficeLevel => &self.office_level,
            SortKey::TwitterHandle => &self.twitter_handle,
        }
    }

    /// All field values, including the render-only tweet link. The search
    /// filter matches against every one of these.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.name,
            &self.twitter_handle,
            &self.twitter_link,
            &self.office_level,
            &self.office_sought,
        ]
    }

    /// Only handles that look like real @-handles get an outbound link;
    /// anything else ("N/A", free text) is shown as-is.
    pub fn has_tweet_link(&self) -> bool {
        self.twitter_handle.starts_with('@')
    }

    /// Share-intent URL with the prefilled thank-you message. The template
    /// text is part of the observable contract and must not be reworded.
    pub fn tweet_intent_url(&self) -> Option<String> {
        if !self.has_tweet_link() {
            return None;
        }
        let text = tweet_prefill(&self.twitter_handle);
        Some(format!(
            "https://twitter.com/intent/tweet?text={}",
            urlencoding::encode(&text)
        ))
    }
}

fn tweet_prefill(handle: &str) -> String {
    format!(
        "{handle} Thanks so much for standing with young people and signing the #GreenNewDeal Pledge! Our futures cannot wait — we need all candidates and elected officials to follow your lead and commit to making the GND a Day 1 priority."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_handle(handle: &str) -> Entry {
        Entry {
            name: "Jane Doe".to_string(),
            twitter_handle: handle.to_string(),
            ..Entry::default()
        }
    }

    #[test]
    fn at_handle_yields_intent_url_with_encoded_prefill() {
        let entry = entry_with_handle("@jdoe");
        let url = entry.tweet_intent_url().unwrap();
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));

        let encoded = url.strip_prefix("https://twitter.com/intent/tweet?text=").unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        assert!(decoded.starts_with("@jdoe Thanks so much"));
        assert!(decoded.contains("#GreenNewDeal Pledge"));
        // The handle must survive encoding ('@' -> %40).
        assert!(encoded.contains("%40jdoe"));
        assert!(!encoded.contains(' '));
    }

    #[test]
    fn non_handle_yields_no_link() {
        let entry = entry_with_handle("N/A");
        assert!(!entry.has_tweet_link());
        assert_eq!(entry.tweet_intent_url(), None);
    }

    #[test]
    fn empty_handle_yields_no_link() {
        let entry = entry_with_handle("");
        assert_eq!(entry.tweet_intent_url(), None);
    }

    #[test]
    fn field_accessor_covers_all_sortable_columns() {
        let entry = Entry {
            name: "n".to_string(),
            twitter_handle: "h".to_string(),
            twitter_link: "l".to_string(),
            office_level: "lv".to_string(),
            office_sought: "o".to_string(),
        };
        assert_eq!(entry.field(SortKey::Name), "n");
        assert_eq!(entry.field(SortKey::OfficeSought), "o");
        assert_eq!(entry.field(SortKey::OfficeLevel), "lv");
        assert_eq!(entry.field(SortKey::TwitterHandle), "h");
        // The link is searchable but not sortable.
        assert!(entry.fields().contains(&"l"));
    }
}
