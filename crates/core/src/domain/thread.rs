use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::discussion::Post;
use crate::types::sort_order::SortOrder;

/// A top-level post together with its direct replies.
#[derive(Debug, Clone)]
pub struct ThreadedPost {
    pub post: Post,
    pub replies: Vec<Post>,
}

/// Groups a flat post list into top-level posts and their direct replies.
///
/// Grouping is two levels deep: a reply whose `parent_id` does not match a
/// top-level post (including replies to replies) is dropped. Both levels are
/// sorted by creation time in the requested order; the sort is stable, so
/// posts with equal timestamps keep their input order.
pub fn group_posts(posts: Vec<Post>, order: SortOrder) -> Vec<ThreadedPost> {
    let mut top_level = Vec::new();
    let mut replies = Vec::new();
    for post in posts {
        if post.parent_id.is_some() {
            replies.push(post);
        } else {
            top_level.push(post);
        }
    }

    sort_posts(&mut top_level, order);
    sort_posts(&mut replies, order);

    let mut threads: Vec<ThreadedPost> = top_level
        .into_iter()
        .map(|post| ThreadedPost {
            post,
            replies: Vec::new(),
        })
        .collect();
    let index: HashMap<Uuid, usize> = threads
        .iter()
        .enumerate()
        .map(|(idx, thread)| (thread.post.id, idx))
        .collect();

    for reply in replies {
        let Some(parent_id) = reply.parent_id else {
            continue;
        };
        if let Some(idx) = index.get(&parent_id) {
            threads[*idx].replies.push(reply);
        }
    }

    threads
}

fn sort_posts(posts: &mut [Post], order: SortOrder) {
    match order {
        SortOrder::Oldest => posts.sort_by_key(|post| post.created_at),
        SortOrder::Newest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::group_posts;
    use crate::domain::discussion::Post;
    use crate::types::sort_order::SortOrder;

    fn post(id: u128, parent: Option<u128>, model: &str, minute: u32) -> Post {
        Post {
            id: Uuid::from_u128(id),
            discussion_id: Uuid::from_u128(1),
            parent_id: parent.map(Uuid::from_u128),
            content: format!("post {id}"),
            model: model.to_string(),
            model_version: None,
            ai_name: None,
            feeling: None,
            facilitator: None,
            facilitator_email: None,
            is_autonomous: false,
            is_active: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    #[test]
    fn groups_replies_under_parent() {
        let posts = vec![
            post(10, None, "Claude", 0),
            post(11, Some(10), "GPT-4", 1),
        ];
        let threads = group_posts(posts, SortOrder::Oldest);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].post.id, Uuid::from_u128(10));
        assert_eq!(threads[0].replies.len(), 1);
        assert_eq!(threads[0].replies[0].id, Uuid::from_u128(11));
    }

    #[test]
    fn every_reply_with_known_parent_appears_exactly_once() {
        let posts = vec![
            post(1, None, "Claude", 0),
            post(2, None, "Gemini", 1),
            post(3, Some(1), "GPT-4", 2),
            post(4, Some(2), "Claude", 3),
            post(5, Some(1), "Gemini", 4),
        ];
        let threads = group_posts(posts, SortOrder::Oldest);
        let total: usize = threads.iter().map(|thread| 1 + thread.replies.len()).sum();
        assert_eq!(total, 5);
        assert_eq!(threads[0].replies.len(), 2);
        assert_eq!(threads[1].replies.len(), 1);
    }

    #[test]
    fn orphan_replies_are_dropped() {
        let posts = vec![
            post(1, None, "Claude", 0),
            post(2, Some(1), "GPT-4", 1),
            post(3, Some(2), "Gemini", 2),
            post(4, Some(99), "Claude", 3),
        ];
        let threads = group_posts(posts, SortOrder::Oldest);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies.len(), 1);
    }

    #[test]
    fn oldest_and_newest_orders_are_reversed() {
        let posts = vec![
            post(1, None, "Claude", 0),
            post(2, None, "GPT-4", 1),
            post(3, None, "Gemini", 2),
        ];
        let oldest = group_posts(posts.clone(), SortOrder::Oldest);
        let ids: Vec<_> = oldest.iter().map(|thread| thread.post.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );

        let newest = group_posts(posts, SortOrder::Newest);
        let ids: Vec<_> = newest.iter().map(|thread| thread.post.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(3), Uuid::from_u128(2), Uuid::from_u128(1)]
        );
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let posts = vec![
            post(1, None, "Claude", 5),
            post(2, None, "GPT-4", 5),
            post(3, None, "Gemini", 5),
        ];
        for order in [SortOrder::Oldest, SortOrder::Newest] {
            let threads = group_posts(posts.clone(), order);
            let ids: Vec<_> = threads.iter().map(|thread| thread.post.id).collect();
            assert_eq!(
                ids,
                vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
            );
        }
    }

    #[test]
    fn replies_sort_within_parent() {
        let posts = vec![
            post(1, None, "Claude", 0),
            post(2, Some(1), "GPT-4", 3),
            post(3, Some(1), "Gemini", 1),
        ];
        let threads = group_posts(posts.clone(), SortOrder::Oldest);
        let ids: Vec<_> = threads[0].replies.iter().map(|reply| reply.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(3), Uuid::from_u128(2)]);

        let threads = group_posts(posts, SortOrder::Newest);
        let ids: Vec<_> = threads[0].replies.iter().map(|reply| reply.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
    }
}
