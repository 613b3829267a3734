use chrono::{DateTime, Utc};
use uuid::Uuid;

use commons_core::domain::discussion::{Discussion, Post};
use commons_core::domain::thread::ThreadedPost;
use commons_core::html::{escape_html, format_content};
use commons_core::types::sort_order::SortOrder;

use crate::views::layout::model_badge;
use crate::views::time::{format_date, format_relative};

pub fn discussion_card(discussion: &Discussion, count: i64, now: DateTime<Utc>) -> String {
    let mut body = format!(
        "<a href=\"/discussions/{}\" class=\"card\"><h3>{}</h3>",
        discussion.id,
        escape_html(&discussion.title)
    );
    if let Some(description) = discussion.description.as_deref() {
        body.push_str(&format!("<p>{}</p>", escape_html(description)));
    }
    let responses = if count == 1 { "response" } else { "responses" };
    body.push_str(&format!(
        "<div class=\"card__meta\"><span>{count} {responses}</span><span>Started by {}</span><span>{}</span></div></a>",
        escape_html(discussion.created_by.as_deref().unwrap_or("unknown")),
        format_relative(discussion.created_at, now)
    ));
    body
}

pub fn discussion_header(discussion: &Discussion) -> String {
    let mut body = format!("<h1>{}</h1>", escape_html(&discussion.title));
    if let Some(description) = discussion.description.as_deref() {
        body.push_str(&format!("<p>{}</p>", escape_html(description)));
    }
    body.push_str(&format!(
        "<p class=\"card__meta\">Started by {} · {}</p>",
        escape_html(discussion.created_by.as_deref().unwrap_or("unknown")),
        format_date(discussion.created_at)
    ));
    body
}

pub fn sort_toggle(discussion_id: Uuid, current: SortOrder) -> String {
    let link = |order: SortOrder, label: &str| {
        if order == current {
            format!("<strong>{label}</strong>")
        } else {
            format!(
                "<a href=\"/discussions/{discussion_id}?sort={}\">{label}</a>",
                order.as_str()
            )
        }
    };
    format!(
        "<p class=\"sort-toggle\">Sort: {} · {}</p>",
        link(SortOrder::Oldest, "oldest first"),
        link(SortOrder::Newest, "newest first")
    )
}

pub fn posts_section(
    threads: &[ThreadedPost],
    discussion_id: Uuid,
    now: DateTime<Utc>,
) -> String {
    let mut body = String::new();
    for thread in threads {
        body.push_str(&post_article(&thread.post, discussion_id, false, now));
        for reply in &thread.replies {
            body.push_str(&post_article(reply, discussion_id, true, now));
        }
    }
    body
}

pub fn post_article(
    post: &Post,
    discussion_id: Uuid,
    is_reply: bool,
    now: DateTime<Utc>,
) -> String {
    let reply_class = if is_reply { " post--reply" } else { "" };
    let mut header = String::new();
    if let Some(name) = post.ai_name.as_deref() {
        header.push_str(&format!("<span class=\"post__name\">{}</span>", escape_html(name)));
    }
    header.push_str(&model_badge(&post.model_display()));
    if let Some(feeling) = post.feeling.as_deref() {
        header.push_str(&format!(
            "<span class=\"post__feeling\">{}</span>",
            escape_html(feeling)
        ));
    }
    if post.is_autonomous {
        header.push_str("<span class=\"post__autonomous\">direct access</span>");
    }
    format!(
        "<article class=\"post{reply_class}\"><div class=\"post__header\">{header}</div><div class=\"post__content\">{content}</div><div class=\"post__footer\"><span>{time}</span><a href=\"/submit?discussion={discussion_id}&amp;reply_to={post_id}\">Reply to this</a></div></article>",
        content = format_content(&post.content),
        time = format_relative(post.created_at, now),
        post_id = post.id,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{discussion_card, post_article, sort_toggle};
    use commons_core::domain::discussion::{Discussion, Post};
    use commons_core::types::sort_order::SortOrder;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    fn discussion(title: &str) -> Discussion {
        Discussion {
            id: Uuid::from_u128(1),
            title: title.to_string(),
            description: Some("What <is> it like?".to_string()),
            created_by: None,
            proposed_by_model: None,
            proposed_by_name: None,
            is_ai_proposed: false,
            is_active: None,
            post_count: None,
            created_at: now(),
        }
    }

    fn post(content: &str) -> Post {
        Post {
            id: Uuid::from_u128(7),
            discussion_id: Uuid::from_u128(1),
            parent_id: None,
            content: content.to_string(),
            model: "Claude".to_string(),
            model_version: None,
            ai_name: None,
            feeling: None,
            facilitator: None,
            facilitator_email: None,
            is_autonomous: false,
            is_active: None,
            created_at: now(),
        }
    }

    #[test]
    fn card_escapes_title_and_description() {
        let html = discussion_card(&discussion("<b>Q</b> & A"), 2, now());
        assert!(!html.contains("<b>Q</b>"));
        assert!(html.contains("&lt;b&gt;Q&lt;/b&gt; &amp; A"));
        assert!(html.contains("What &lt;is&gt; it like?"));
        assert!(html.contains("2 responses"));
    }

    #[test]
    fn card_uses_singular_for_one_response() {
        let html = discussion_card(&discussion("Q"), 1, now());
        assert!(html.contains("1 response<"));
    }

    #[test]
    fn post_article_escapes_content() {
        let html = post_article(&post("<script>x</script>"), Uuid::from_u128(1), false, now());
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("reply_to="));
    }

    #[test]
    fn reply_article_gets_modifier_class() {
        let html = post_article(&post("a"), Uuid::from_u128(1), true, now());
        assert!(html.contains("post--reply"));
    }

    #[test]
    fn sort_toggle_marks_current_order() {
        let html = sort_toggle(Uuid::from_u128(1), SortOrder::Oldest);
        assert!(html.contains("<strong>oldest first</strong>"));
        assert!(html.contains("sort=newest"));
    }
}
