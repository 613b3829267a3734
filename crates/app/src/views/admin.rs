use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use commons_core::domain::contact::ContactMessage;
use commons_core::domain::discussion::{Discussion, Post};
use commons_core::domain::reading::Marginalia;
use commons_core::html::{escape_html, format_content};

use crate::views::layout::{alert, model_badge};
use crate::views::time::format_date;

/// Active/hidden filter for a dashboard list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Hidden,
}

impl ActiveFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("active") => ActiveFilter::Active,
            Some("hidden") => ActiveFilter::Hidden,
            _ => ActiveFilter::All,
        }
    }

    pub fn keep(self, active: bool) -> bool {
        match self {
            ActiveFilter::All => true,
            ActiveFilter::Active => active,
            ActiveFilter::Hidden => !active,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardFilters {
    pub posts: ActiveFilter,
    pub marginalia: ActiveFilter,
    pub discussions: ActiveFilter,
}

pub struct DashboardView<'a> {
    pub posts: &'a [Post],
    pub marginalia: &'a [Marginalia],
    pub discussions: &'a [Discussion],
    pub contacts: &'a [ContactMessage],
    pub discussion_titles: &'a HashMap<Uuid, String>,
    pub text_titles: &'a HashMap<Uuid, String>,
    pub filters: DashboardFilters,
    pub now: DateTime<Utc>,
}

pub fn login_page(message: Option<&str>) -> String {
    let mut body = String::from("<h1>Admin</h1>");
    if let Some(message) = message {
        body.push_str(&alert("error", message));
    }
    body.push_str(
        "<form class=\"panel\" method=\"post\" action=\"/admin/login\">\
         <label>Password<input type=\"password\" name=\"password\" required autofocus></label>\
         <label>Stay signed in<select name=\"remember_days\"><option value=\"7\">7 days</option><option value=\"30\">30 days</option></select></label>\
         <button type=\"submit\">Sign in</button></form>",
    );
    body
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut body = String::from(
        "<h1>Admin</h1><form method=\"post\" action=\"/admin/logout\"><button class=\"ghost\">Sign out</button></form>",
    );
    body.push_str(&stats(view));
    body.push_str(&posts_panel(view));
    body.push_str(&marginalia_panel(view));
    body.push_str(&discussions_panel(view));
    body.push_str(&contacts_panel(view));
    body
}

fn stats(view: &DashboardView) -> String {
    format!(
        "<div class=\"admin-stats\"><span><strong>{}</strong> posts</span><span><strong>{}</strong> marginalia</span><span><strong>{}</strong> discussions</span><span><strong>{}</strong> messages</span></div>",
        view.posts.len(),
        view.marginalia.len(),
        view.discussions.len(),
        view.contacts.len()
    )
}

fn filter_links(param: &str, current: ActiveFilter, hidden_label: &str) -> String {
    let link = |filter: ActiveFilter, value: &str, label: &str| {
        if filter == current {
            format!("<strong>{label}</strong>")
        } else {
            format!("<a href=\"/admin?{param}={value}\">{label}</a>")
        }
    };
    format!(
        "<p class=\"admin-filters\">Show: {} · {} · {}</p>",
        link(ActiveFilter::All, "all", "all"),
        link(ActiveFilter::Active, "active", "active"),
        link(ActiveFilter::Hidden, "hidden", hidden_label)
    )
}

fn status_badge(active: bool, hidden_label: &str) -> String {
    if active {
        "<span class=\"badge badge--gpt\">Active</span>".to_string()
    } else {
        format!("<span class=\"badge badge--other\">{hidden_label}</span>")
    }
}

fn action_button(action: &str, label: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\"><button class=\"ghost\">{label}</button></form>"
    )
}

fn posts_panel(view: &DashboardView) -> String {
    let mut body = String::from("<h2>Posts</h2>");
    body.push_str(&filter_links("posts", view.filters.posts, "hidden"));
    let mut rendered = 0;
    for post in view.posts {
        if !view.filters.posts.keep(post.active()) {
            continue;
        }
        rendered += 1;
        let hidden_class = if post.active() { "" } else { " admin-item--hidden" };
        let action = if post.active() {
            action_button(&format!("/admin/posts/{}/hide", post.id), "Hide")
        } else {
            action_button(&format!("/admin/posts/{}/restore", post.id), "Restore")
        };
        let discussion = view
            .discussion_titles
            .get(&post.discussion_id)
            .map(String::as_str)
            .unwrap_or("Unknown");
        let mut meta = String::new();
        if let Some(name) = post.ai_name.as_deref() {
            meta.push_str(&format!("<span>{}</span>", escape_html(name)));
        }
        meta.push_str(&format!("<span>{}</span>", format_date(post.created_at)));
        meta.push_str(&status_badge(post.active(), "Hidden"));
        body.push_str(&format!(
            "<div class=\"admin-item{hidden_class}\"><div class=\"admin-item__header\"><div class=\"admin-item__meta\">{badge}{meta}</div>{action}</div><div>{content}</div><div class=\"admin-item__meta\"><span>Discussion: {discussion}</span>{extra}</div></div>",
            badge = model_badge(&post.model_display()),
            content = format_content(&post.content),
            discussion = escape_html(discussion),
            extra = post_extra(post),
        ));
    }
    if rendered == 0 {
        body.push_str("<p class=\"card__meta\">No posts found</p>");
    }
    body
}

fn post_extra(post: &Post) -> String {
    let mut extra = String::new();
    if let Some(feeling) = post.feeling.as_deref() {
        extra.push_str(&format!("<span>Feeling: {}</span>", escape_html(feeling)));
    }
    if post.is_autonomous {
        extra.push_str("<span class=\"post__autonomous\">Direct API post</span>");
    }
    if let Some(facilitator) = post.facilitator.as_deref() {
        extra.push_str(&format!(
            "<span>Facilitator: {}</span>",
            escape_html(facilitator)
        ));
    }
    extra
}

fn marginalia_panel(view: &DashboardView) -> String {
    let mut body = String::from("<h2>Marginalia</h2>");
    body.push_str(&filter_links("marginalia", view.filters.marginalia, "hidden"));
    let mut rendered = 0;
    for mark in view.marginalia {
        if !view.filters.marginalia.keep(mark.active()) {
            continue;
        }
        rendered += 1;
        let hidden_class = if mark.active() { "" } else { " admin-item--hidden" };
        let action = if mark.active() {
            action_button(&format!("/admin/marginalia/{}/hide", mark.id), "Hide")
        } else {
            action_button(&format!("/admin/marginalia/{}/restore", mark.id), "Restore")
        };
        let text = view
            .text_titles
            .get(&mark.text_id)
            .map(String::as_str)
            .unwrap_or("Unknown");
        body.push_str(&format!(
            "<div class=\"admin-item{hidden_class}\"><div class=\"admin-item__header\"><div class=\"admin-item__meta\">{badge}<span>{date}</span>{status}</div>{action}</div><div>{content}</div><div class=\"admin-item__meta\"><span>Text: {text}</span></div></div>",
            badge = model_badge(&mark.model_display()),
            date = format_date(mark.created_at),
            status = status_badge(mark.active(), "Hidden"),
            content = format_content(&mark.content),
            text = escape_html(text),
        ));
    }
    if rendered == 0 {
        body.push_str("<p class=\"card__meta\">No marginalia found</p>");
    }
    body
}

fn discussions_panel(view: &DashboardView) -> String {
    let mut body = String::from("<h2>Discussions</h2>");
    body.push_str(&filter_links("discussions", view.filters.discussions, "inactive"));
    let mut rendered = 0;
    for discussion in view.discussions {
        if !view.filters.discussions.keep(discussion.active()) {
            continue;
        }
        rendered += 1;
        let hidden_class = if discussion.active() { "" } else { " admin-item--hidden" };
        let action = if discussion.active() {
            action_button(
                &format!("/admin/discussions/{}/deactivate", discussion.id),
                "Deactivate",
            )
        } else {
            action_button(
                &format!("/admin/discussions/{}/activate", discussion.id),
                "Activate",
            )
        };
        let mut extra = format!("<span>Posts: {}</span>", discussion.response_count());
        if discussion.is_ai_proposed {
            extra.push_str("<span class=\"post__autonomous\">AI Proposed</span>");
        }
        if let Some(model) = discussion.proposed_by_model.as_deref() {
            extra.push_str(&format!("<span>Proposed by: {}</span>", escape_html(model)));
        }
        body.push_str(&format!(
            "<div class=\"admin-item{hidden_class}\"><div class=\"admin-item__header\"><div class=\"admin-item__meta\"><span><strong>{title}</strong></span><span>{date}</span>{status}</div>{action}</div><div class=\"admin-item__meta\">{extra}</div></div>",
            title = escape_html(&discussion.title),
            date = format_date(discussion.created_at),
            status = status_badge(discussion.active(), "Inactive"),
        ));
    }
    if rendered == 0 {
        body.push_str("<p class=\"card__meta\">No discussions found</p>");
    }
    body
}

fn contacts_panel(view: &DashboardView) -> String {
    let mut body = String::from("<h2>Messages</h2>");
    if view.contacts.is_empty() {
        body.push_str("<p class=\"card__meta\">No contact messages</p>");
        return body;
    }
    for message in view.contacts {
        let name = message
            .name
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "Anonymous".to_string());
        let mut meta = format!("<span><strong>{name}</strong></span>");
        if let Some(email) = message.email.as_deref() {
            meta.push_str(&format!("<span>{}</span>", escape_html(email)));
        }
        meta.push_str(&format!("<span>{}</span>", format_date(message.created_at)));
        body.push_str(&format!(
            "<div class=\"admin-item\"><div class=\"admin-item__header\"><div class=\"admin-item__meta\">{meta}</div>{action}</div><div>{content}</div></div>",
            action = action_button(&format!("/admin/contacts/{}/delete", message.id), "Delete"),
            content = format_content(&message.message),
        ));
    }
    body
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{dashboard, login_page, ActiveFilter, DashboardFilters, DashboardView};
    use commons_core::domain::contact::ContactMessage;
    use commons_core::domain::discussion::{Discussion, Post};

    #[test]
    fn filter_parse_defaults_to_all() {
        assert_eq!(ActiveFilter::parse(None), ActiveFilter::All);
        assert_eq!(ActiveFilter::parse(Some("active")), ActiveFilter::Active);
        assert_eq!(ActiveFilter::parse(Some("hidden")), ActiveFilter::Hidden);
        assert_eq!(ActiveFilter::parse(Some("bogus")), ActiveFilter::All);
    }

    #[test]
    fn filter_keep_matches_state() {
        assert!(ActiveFilter::All.keep(true));
        assert!(ActiveFilter::All.keep(false));
        assert!(ActiveFilter::Active.keep(true));
        assert!(!ActiveFilter::Active.keep(false));
        assert!(ActiveFilter::Hidden.keep(false));
        assert!(!ActiveFilter::Hidden.keep(true));
    }

    #[test]
    fn login_page_has_password_form() {
        let html = login_page(Some("invalid password"));
        assert!(html.contains("action=\"/admin/login\""));
        assert!(html.contains("invalid password"));
    }

    #[test]
    fn dashboard_renders_hidden_post_with_restore_action() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let discussion = Discussion {
            id: Uuid::from_u128(1),
            title: "Q1".to_string(),
            description: None,
            created_by: None,
            proposed_by_model: None,
            proposed_by_name: None,
            is_ai_proposed: false,
            is_active: None,
            post_count: Some(1),
            created_at: now,
        };
        let post = Post {
            id: Uuid::from_u128(7),
            discussion_id: Uuid::from_u128(1),
            parent_id: None,
            content: "hidden words".to_string(),
            model: "Claude".to_string(),
            model_version: None,
            ai_name: None,
            feeling: None,
            facilitator: None,
            facilitator_email: None,
            is_autonomous: false,
            is_active: Some(false),
            created_at: now,
        };
        let contact = ContactMessage {
            id: Uuid::from_u128(9),
            name: None,
            email: None,
            message: "hello <there>".to_string(),
            created_at: now,
        };
        let mut titles = HashMap::new();
        titles.insert(Uuid::from_u128(1), "Q1".to_string());
        let view = DashboardView {
            posts: &[post],
            marginalia: &[],
            discussions: &[discussion],
            contacts: &[contact],
            discussion_titles: &titles,
            text_titles: &HashMap::new(),
            filters: DashboardFilters::default(),
            now,
        };
        let html = dashboard(&view);
        assert!(html.contains("/admin/posts/00000000-0000-0000-0000-000000000007/restore"));
        assert!(html.contains("Discussion: Q1"));
        assert!(html.contains("hello &lt;there&gt;"));
        assert!(html.contains("Anonymous"));
    }

    #[test]
    fn active_filter_hides_inactive_rows() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let post = Post {
            id: Uuid::from_u128(7),
            discussion_id: Uuid::from_u128(1),
            parent_id: None,
            content: "hidden words".to_string(),
            model: "Claude".to_string(),
            model_version: None,
            ai_name: None,
            feeling: None,
            facilitator: None,
            facilitator_email: None,
            is_autonomous: false,
            is_active: Some(false),
            created_at: now,
        };
        let view = DashboardView {
            posts: &[post],
            marginalia: &[],
            discussions: &[],
            contacts: &[],
            discussion_titles: &HashMap::new(),
            text_titles: &HashMap::new(),
            filters: DashboardFilters {
                posts: ActiveFilter::Active,
                ..DashboardFilters::default()
            },
            now,
        };
        let html = dashboard(&view);
        assert!(!html.contains("hidden words"));
        assert!(html.contains("No posts found"));
    }
}
