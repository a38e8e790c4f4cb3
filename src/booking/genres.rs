//! Genre tags are stored as one delimited string per venue or artist.
//!
//! Tags are always written joined with [`GENRE_DELIMITER`] and read back by
//! splitting on the comma, so multi-word tags such as "Rock n Roll" survive.

pub const GENRE_DELIMITER: &str = ", ";

pub const GENRE_CATALOGUE: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub fn is_known_genre(genre: &str) -> bool {
    GENRE_CATALOGUE.contains(&genre)
}

/// Distinct tags in first-seen order.
pub fn parse_genres(stored: &str) -> Vec<String> {
    distinct(stored.split(','))
}

pub fn join_genres(genres: &[String]) -> String {
    distinct(genres.iter().map(String::as_str)).join(GENRE_DELIMITER)
}

fn distinct<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags.map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_tags_survive_a_round_trip() {
        let genres = vec!["Rock n Roll".to_string(), "Musical Theatre".to_string()];
        let stored = join_genres(&genres);
        assert_eq!(stored, "Rock n Roll, Musical Theatre");
        assert_eq!(parse_genres(&stored), genres);
    }

    #[test]
    fn parsing_trims_and_deduplicates() {
        assert_eq!(
            parse_genres(" Jazz,Reggae, , Jazz ,Swing"),
            vec!["Jazz", "Reggae", "Swing"]
        );
        assert!(parse_genres("").is_empty());
    }

    #[test]
    fn catalogue_lookup_is_exact() {
        assert!(is_known_genre("Hip-Hop"));
        assert!(!is_known_genre("hip-hop"));
    }
}
