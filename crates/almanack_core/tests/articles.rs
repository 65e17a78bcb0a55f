use almanack_core::{
    ArcArticle, ContentBlock, ContentBlocks, ContentEntry, HtmlEntry, Route, SharedArticle,
    SharingFlags, SharingStatus, WireStatus,
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn story() -> Value {
    json!({
        "_id": "ABC123",
        "slug": "budget-deal",
        "canonical_url": "/news/2023/03/budget-deal-abc123",
        "headlines": {"basic": "Budget deal reached"},
        "description": {"basic": "Lawmakers agree on a plan"},
        "planning": {
            "budget_line": "Deal done after months of talks",
            "internal_note": "Hold for photos",
            "scheduling": {"planned_publish_date": "2023-03-06T15:00:00Z"},
            "story_length": {
                "word_count_planned": 1200,
                "word_count_actual": 12345,
                "line_count_actual": 80,
                "inch_count_actual": 20.5
            }
        },
        "workflow": {"status_code": 5},
        "credits": {"by": [
            {"name": "Angela Couloumbis", "org": "Spotlight PA"},
            {"name": "Jane Doe of The Inquirer", "org": "ignored"},
            {"name": "Wire", "additional_properties": {"original": {"byline": "Staff Reports"}}}
        ]},
        "promo_items": {"basic": {
            "url": "https://cdn.example.com/public/abc.jpg",
            "caption": "The Capitol",
            "credits": {"by": [{"name": "Photog"}, {"byline": "Agency"}]}
        }},
        "content_elements": [
            {"type": "header", "level": 2, "content": "Intro"},
            {"type": "image", "url": "https://cdn.example.com/1.jpg"},
            {"type": "text", "content": "Body"},
            {"type": "image", "url": "https://cdn.example.com/2.jpg"}
        ]
    })
}

#[test]
fn wire_article_fields() {
    let article = ArcArticle::from_raw(&story());

    assert_eq!(article.id, "ABC123");
    assert_eq!(article.headline, "Budget deal reached");
    assert_eq!(article.note, "Hold for photos");
    assert_eq!(article.planned_word_count, Some(1200));
    assert_eq!(article.actual_inch_count, Some(20.5));
    assert_eq!(
        article.planned_date,
        Some(Utc.with_ymd_and_hms(2023, 3, 6, 15, 0, 0).unwrap())
    );
    assert_eq!(article.featured_image_caption, "The Capitol");
}

#[test]
fn wire_article_links() {
    let article = ArcArticle::from_raw(&story());

    assert_eq!(article.pubslug(), "budget-deal");
    assert_eq!(
        article.pub_url(),
        "https://www.spotlightpa.org/news/2023/03/budget-deal/"
    );
    assert_eq!(
        article.arc_url(),
        "https://pmn.arcpublishing.com/composer/edit/ABC123/"
    );
    assert_eq!(
        article.details_route(),
        Route {
            name: "article",
            id: "ABC123".to_string()
        }
    );
}

#[test]
fn almanack_note_takes_precedence() {
    let mut raw = story();
    raw["almanack-note"] = json!("Run Sunday");
    assert_eq!(ArcArticle::from_raw(&raw).note, "Run Sunday");
}

#[test]
fn authors_and_byline() {
    let article = ArcArticle::from_raw(&story());

    assert_eq!(
        article.authors(),
        vec![
            "Angela Couloumbis of Spotlight PA",
            "Jane Doe of The Inquirer",
            "Staff Reports",
        ]
    );
    assert_eq!(
        article.byline(),
        "Angela Couloumbis of Spotlight PA, Jane Doe of The Inquirer and Staff Reports"
    );
}

#[test]
fn wire_status_from_workflow() {
    assert_eq!(ArcArticle::from_raw(&story()).wire_status(), WireStatus::Slot);

    let mut raw = story();
    raw["additional_properties"] = json!({"has_published_copy": true});
    assert_eq!(ArcArticle::from_raw(&raw).wire_status(), WireStatus::Published);

    raw = story();
    raw["workflow"]["status_code"] = json!(42);
    let status = ArcArticle::from_raw(&raw).wire_status();
    assert_eq!(status, WireStatus::Unknown);
    assert_eq!(status.verbose(), "Unknown");
}

#[test]
fn featured_image_prefers_public_url() {
    let article = ArcArticle::from_raw(&story());
    assert_eq!(
        article.featured_image().as_deref(),
        Some("https://cdn.example.com/public/abc.jpg")
    );
    assert!(article.featured_image_proxy().starts_with("/api/proxy-image/"));
    assert_eq!(article.featured_image_credits(), vec!["Photog", "Agency"]);

    let mut raw = story();
    raw["promo_items"]["basic"]["url"] = json!("https://cdn.example.com/private/abc.jpg");
    raw["promo_items"]["basic"]["additional_properties"] =
        json!({"resizeUrl": "https://resizer.example.com/abc.jpg"});
    assert_eq!(
        ArcArticle::from_raw(&raw).featured_image().as_deref(),
        Some("https://resizer.example.com/abc.jpg")
    );

    raw["promo_items"] = Value::Null;
    let article = ArcArticle::from_raw(&raw);
    assert_eq!(article.featured_image(), None);
    assert_eq!(article.featured_image_proxy(), "");
}

#[test]
fn blocks_are_numbered_consistently() {
    let article = ArcArticle::from_raw(&story());
    let blocks = article.blocks();

    let content = blocks.content();
    assert_eq!(content.len(), 4);
    assert!(matches!(content[0], ContentEntry::Block(_)));
    assert_eq!(content[1], ContentEntry::Placeholder { n: 1 });
    assert!(matches!(content[2], ContentEntry::Block(_)));
    assert_eq!(content[3], ContentEntry::Placeholder { n: 2 });

    let embeds = blocks.embeds();
    let numbers: Vec<usize> = embeds.iter().map(|e| e.n).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(embeds[0].block, &blocks.blocks()[1]);
    assert_eq!(embeds[1].block, &blocks.blocks()[3]);
}

#[test]
fn html_view_inlines_embeds_and_skips_ignored_blocks() {
    let blocks = ContentBlocks::from_story(&json!({
        "_id": "MIXED",
        "content_elements": [
            {"type": "header", "level": 2, "content": "Budget"},
            {"type": "code", "content": "<pre>x = 1</pre>"},
            {"type": "image", "url": "https://example.com/a.jpg", "caption": "A"},
            {"type": "oembed_response", "raw_oembed": {"html": "<iframe src=\"v\"></iframe>"}},
            {"type": "raw_html", "content": "<div>raw</div>"},
            {"type": "interstitial_link", "url": "https://example.com", "content": "Read more"},
            {"type": "mystery", "content": "?"}
        ]
    }));
    let all = blocks.blocks();
    assert_eq!(all.len(), 7);
    assert_eq!(all[6], ContentBlock::Unrecognized { kind: "mystery".to_string() });

    assert_eq!(
        blocks.html(),
        vec![
            HtmlEntry::Block(&all[0]),
            HtmlEntry::RawHtml("<pre>x = 1</pre>"),
            HtmlEntry::Placeholder { n: 2 },
            HtmlEntry::RawHtml("<iframe src=\"v\"></iframe>"),
            HtmlEntry::RawHtml("<div>raw</div>"),
        ]
    );

    assert_eq!(
        blocks.content(),
        vec![
            ContentEntry::Block(&all[0]),
            ContentEntry::Placeholder { n: 1 },
            ContentEntry::Placeholder { n: 2 },
            ContentEntry::Placeholder { n: 3 },
            ContentEntry::Placeholder { n: 4 },
        ]
    );

    let embeds = blocks.embeds();
    let numbered: Vec<(usize, &str)> = embeds.iter().map(|e| (e.n, e.block.kind())).collect();
    assert_eq!(
        numbered,
        vec![
            (1, "code"),
            (2, "image"),
            (3, "oembed_response"),
            (4, "raw_html")
        ]
    );
    assert_eq!(blocks.embed_count(), 4);
}

#[test]
fn list_sorts_by_planned_date_newest_first() {
    let payload = json!({"contents": [
        {"_id": "old", "planning": {"scheduling": {"planned_publish_date": "2023-01-01T00:00:00Z"}}},
        {"_id": "undated"},
        {"_id": "new", "planning": {"scheduling": {"planned_publish_date": "2023-06-01T00:00:00Z"}}}
    ]});
    let ids: Vec<String> = ArcArticle::list_from(&payload)
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["new", "old", "undated"]);

    let bare = json!([{"_id": "only"}]);
    assert_eq!(ArcArticle::list_from(&bare).len(), 1);
}

fn shared(status: &str, embargo_until: Value) -> Value {
    json!({
        "id": "7",
        "source_id": "ABC123",
        "note": "Please credit Spotlight PA",
        "status": status,
        "embargo_until": embargo_until,
        "raw_data": story()
    })
}

#[test]
fn shared_article_status_follows_flags() {
    let now = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();

    let preview = SharedArticle::from_raw(&shared("P", Value::Null));
    assert_eq!(preview.sharing_status_at(now), SharingStatus::Preview);

    let released = SharedArticle::from_raw(&shared("S", Value::Null));
    assert_eq!(released.sharing_status_at(now), SharingStatus::Released);

    let embargoed = SharedArticle::from_raw(&shared("S", json!("2023-03-02T00:00:00Z")));
    assert_eq!(embargoed.sharing_status_at(now), SharingStatus::Embargo);
    assert_eq!(
        embargoed.sharing_status_at(now + Duration::days(1)),
        SharingStatus::Released
    );

    let imported = SharedArticle::from_raw(&shared("", Value::Null));
    assert_eq!(imported.sharing_status_at(now), SharingStatus::Imported);

    let draft = SharedArticle::from_raw(&json!({}));
    assert_eq!(draft.sharing_status_at(now), SharingStatus::Draft);
}

#[test]
fn shared_article_wraps_wire_record() {
    let article = SharedArticle::from_raw(&shared("S", Value::Null));
    assert_eq!(article.story.headline, "Budget deal reached");
    assert_eq!(article.wire_status(), WireStatus::Slot);
    assert_eq!(article.details_route().id, "ABC123");
}

#[test]
fn shared_article_email() {
    let article = SharedArticle::from_raw(&shared("S", Value::Null));

    assert_eq!(article.email_subject(), "New Spotlight PA story budget-deal");
    assert_eq!(
        article.email_body(),
        "New budget-deal\n\
         \n\
         https://almanack.data.spotlightpa.org/articles/ABC123\n\
         \n\
         Planned for Monday, March 6, 2023\n\
         \n\
         Publication Notes:\n\
         \n\
         Please credit Spotlight PA\n\
         \n\
         Budget:\n\
         \n\
         Deal done after months of talks\n\
         \n\
         Word count planned: 1,200\n\
         Word count actual: 12,345\n\
         Lines: 80\n\
         Column inches: 20.5"
    );
}

#[test]
fn sharing_status_is_total() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let embargoes = [
        None,
        Some(now - Duration::hours(1)),
        Some(now),
        Some(now + Duration::hours(1)),
    ];

    for has_id in [false, true] {
        for is_previewed in [false, true] {
            for is_shared in [false, true] {
                for embargo_until in embargoes {
                    let flags = SharingFlags {
                        has_id,
                        is_previewed,
                        is_shared,
                        embargo_until,
                    };
                    let status = flags.status_at(now);
                    let embargo_elapsed = embargo_until.is_none_or(|until| until <= now);
                    let expected = if is_shared && embargo_elapsed {
                        SharingStatus::Released
                    } else if is_shared {
                        SharingStatus::Embargo
                    } else if is_previewed {
                        SharingStatus::Preview
                    } else if has_id {
                        SharingStatus::Imported
                    } else {
                        SharingStatus::Draft
                    };
                    assert_eq!(status, expected, "{flags:?}");
                }
            }
        }
    }
}
