use super::manga::MangaRecord;

/// Constraints for listing stored manga. Every `None` dimension matches all
/// records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MangaFilter {
    /// Case-insensitive substring of the manga name.
    pub name: Option<String>,
    /// Matches when the record carries at least one of these genres.
    pub genres: Option<Vec<String>>,
    /// Exact status.
    pub status: Option<String>,
}

impl MangaFilter {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.genres.is_none() && self.status.is_none()
    }

    /// Case-insensitive substring test on the name, folding Unicode case.
    #[must_use]
    pub fn matches_name(&self, record: &MangaRecord) -> bool {
        self.name.as_ref().is_none_or(|name| {
            record
                .manga_name
                .to_lowercase()
                .contains(&name.to_lowercase())
        })
    }

    /// Evaluates every dimension of the filter against a record in memory.
    #[must_use]
    pub fn matches(&self, record: &MangaRecord) -> bool {
        let name_ok = self.matches_name(record);

        let genres_ok = self
            .genres
            .as_ref()
            .is_none_or(|wanted| record.genres.iter().any(|g| wanted.contains(g)));

        let status_ok = self.status.as_ref().is_none_or(|s| record.status == *s);

        name_ok && genres_ok && status_ok
    }
}
