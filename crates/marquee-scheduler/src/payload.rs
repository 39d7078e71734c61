//! Release notification payloads.

use serde::Serialize;

use marquee_catalog::{Movie, Theater};
use marquee_push::Action;

use crate::movie_display_image;

/// Data sent to devices, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// Exactly one movie released today.
    Release {
        #[serde(skip_serializing_if = "String::is_empty")]
        image: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        text: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        expanded_text: String,
        movie_id: i64,
        actions: Vec<Action>,
    },
    /// Several movies released today.
    Releases {
        #[serde(skip_serializing_if = "String::is_empty")]
        text: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        expanded_text: String,
        big_text: String,
        #[serde(skip_serializing_if = "is_zero")]
        theater_id: i64,
    },
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

/// Build the payload for a theater's releases, or `None` when there are none.
///
/// Multi-release titles keep the iteration order of `releases`.
pub fn build_payload(
    theater: Option<&Theater>,
    releases: &[Movie],
    weekday: usize,
) -> Option<NotificationPayload> {
    let theater_name = theater.map(|t| t.name.clone()).unwrap_or_default();

    match releases {
        [] => None,
        [release] => {
            let mut actions = vec![Action::movie_details(release.id)];
            if let Some(trailer) = &release.trailer {
                actions.push(Action::view_trailer(trailer.id.clone()));
            }

            Some(NotificationPayload::Release {
                image: movie_display_image(release, weekday),
                text: theater_name,
                expanded_text: release.title.clone(),
                movie_id: release.id,
                actions,
            })
        }
        _ => {
            let big_text = releases
                .iter()
                .map(|m| m.title.as_str())
                .collect::<Vec<_>>()
                .join("\n");

            Some(NotificationPayload::Releases {
                text: theater_name.clone(),
                expanded_text: theater_name,
                big_text,
                theater_id: theater.map(|t| t.id).unwrap_or_default(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::testing::{images, movie, theater, with_trailer};

    #[test]
    fn test_no_releases_no_payload() {
        assert!(build_payload(Some(&theater(1, "Downtown")), &[], 0).is_none());
    }

    #[test]
    fn test_single_release_with_trailer() {
        let release = with_trailer(movie(5, "Alien", None), "yt-5");
        let payload = build_payload(Some(&theater(1, "Downtown")), &[release], 0).unwrap();

        match payload {
            NotificationPayload::Release {
                image,
                text,
                expanded_text,
                movie_id,
                actions,
            } => {
                assert_eq!(image, "https://img/5/large.jpg");
                assert_eq!(text, "Downtown");
                assert_eq!(expanded_text, "Alien");
                assert_eq!(movie_id, 5);
                assert_eq!(actions.len(), 2);
                assert_eq!(actions[0].kind(), "movie_details");
                assert_eq!(actions[1].kind(), "view_trailer");
                assert_eq!(actions[1], Action::view_trailer("yt-5"));
            }
            other => panic!("Expected Release payload, got {:?}", other),
        }
    }

    #[test]
    fn test_single_release_without_trailer() {
        let payload = build_payload(None, &[movie(5, "Alien", None)], 0).unwrap();

        match payload {
            NotificationPayload::Release { actions, text, .. } => {
                assert_eq!(actions, vec![Action::movie_details(5)]);
                assert_eq!(text, "");
            }
            other => panic!("Expected Release payload, got {:?}", other),
        }
    }

    #[test]
    fn test_single_release_image_rotates_with_weekday() {
        let mut release = movie(5, "Alien", None);
        release.images = Some(images(&["b0", "b1"], &["p0"]));

        let image_for = |weekday| match build_payload(None, &[release.clone()], weekday) {
            Some(NotificationPayload::Release { image, .. }) => image,
            other => panic!("Expected Release payload, got {:?}", other),
        };

        assert_eq!(image_for(0), "b0");
        assert_eq!(image_for(3), "b1");
    }

    #[test]
    fn test_multi_release_big_text() {
        let releases = vec![movie(1, "A", None), movie(2, "B", None), movie(3, "C", None)];
        let payload = build_payload(Some(&theater(9, "Riverside")), &releases, 0).unwrap();

        match payload {
            NotificationPayload::Releases {
                text,
                expanded_text,
                big_text,
                theater_id,
            } => {
                assert_eq!(text, "Riverside");
                assert_eq!(expanded_text, "Riverside");
                assert_eq!(big_text, "A\nB\nC");
                assert_eq!(big_text.len(), 3 + 2);
                assert_eq!(theater_id, 9);
            }
            other => panic!("Expected Releases payload, got {:?}", other),
        }
    }

    #[test]
    fn test_wire_format() {
        let payload = build_payload(
            Some(&theater(1, "Downtown")),
            &[movie(1, "A", None), movie(2, "B", None)],
            0,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "type": "releases",
                "text": "Downtown",
                "expanded_text": "Downtown",
                "big_text": "A\nB",
                "theater_id": 1
            })
        );

        let mut bare = movie(7, "Heat", None);
        bare.poster_urls.large = None;
        let payload = build_payload(None, &[bare], 0).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["type"], "release");
        assert_eq!(json["movie_id"], 7);
        assert!(json.get("image").is_none());
        assert_eq!(json["actions"][0]["type"], "movie_details");
    }

    #[test]
    fn test_unknown_theater_omits_empty_fields() {
        let payload = build_payload(None, &[movie(1, "A", None), movie(2, "B", None)], 0).unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "type": "releases",
                "big_text": "A\nB"
            })
        );

        let payload = build_payload(None, &[movie(7, "Heat", None)], 0).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("text").is_none());
        assert_eq!(json["expanded_text"], "Heat");
    }

    proptest! {
        #[test]
        fn big_text_joins_titles(titles in proptest::collection::vec("[A-Za-z ]{1,20}", 2..10)) {
            let releases: Vec<Movie> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| movie(i as i64, t, None))
                .collect();

            let Some(NotificationPayload::Releases { big_text, .. }) = build_payload(None, &releases, 0) else {
                panic!("expected multi-release payload");
            };

            let expected_len: usize = titles.iter().map(String::len).sum::<usize>() + titles.len() - 1;
            prop_assert_eq!(big_text.len(), expected_len);
            prop_assert!(!big_text.ends_with('\n'));
            prop_assert_eq!(big_text.split('\n').collect::<Vec<_>>(), titles.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
