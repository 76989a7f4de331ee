//! Adapter layer: Convert Discogs releases to reviews

use super::dto;
use crate::model::Review;

const SOURCE: &str = "Discogs";

/// Build a review from a release's community data.
///
/// Rating and summary come from the community rating when anyone voted.
/// Release notes become the text. With neither, the collection counts make
/// up the summary. A release with no community data at all yields a review
/// carrying only source and URL.
pub fn to_review(release: dto::Release) -> Review {
    let mut review = Review {
        source: SOURCE.to_string(),
        url: format!("https://www.discogs.com/release/{}", release.id),
        ..Default::default()
    };

    let community = release.community;
    if community.rating.count > 0 {
        review.rating = community.rating.average;
        review.summary = format!(
            "Community rating based on {} user ratings",
            community.rating.count
        );
    }

    if let Some(notes) = release.notes.filter(|n| !n.trim().is_empty()) {
        review.text = notes;
        review.author = "Community".to_string();
    }

    if review.summary.is_empty()
        && review.text.is_empty()
        && (community.have > 0 || community.want > 0)
    {
        review.summary = format!(
            "Collected by {} users, wanted by {} users",
            community.have, community.want
        );
    }

    review
}
