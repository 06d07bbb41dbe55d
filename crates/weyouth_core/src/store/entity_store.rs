//! Owned entity collections with write-through persistence.
//!
//! # Invariants
//! - Every mutating entry point authorizes the actor first.
//! - Mutations build the next collection, persist it, and only then swap it
//!   in. `publish` swaps first and restores its snapshot if the write fails.
//! - Ids come from one `IdGenerator` seeded with every loaded id.

use super::{DraftSession, EntityKind, StoreError, StoreResult};
use crate::auth::capability::{authorize, Capability};
use crate::clock::{Clock, IdGenerator};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::notice::{Notice, NoticeDraft, NoticePatch};
use crate::model::post::{Comment, Post, PostDraft, PostFilter};
use crate::model::require_title_and_content;
use crate::model::schedule::{ScheduleEntry, WorshipInfo};
use crate::model::seed;
use crate::model::session::Session;
use crate::persistence::{encode_record, load_record, save_record, PersistenceGateway, StorageKey};
use chrono::NaiveDate;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub notice_count: usize,
    pub post_count: usize,
    pub attendance_today: usize,
}

/// Single owner of all community data for one process.
pub struct EntityStore<G: PersistenceGateway, C: Clock> {
    gateway: G,
    clock: C,
    ids: IdGenerator,
    notices: Vec<Notice>,
    posts: Vec<Post>,
    schedule: Vec<ScheduleEntry>,
    worship_info: WorshipInfo,
    attendance: Vec<AttendanceRecord>,
}

impl<G: PersistenceGateway, C: Clock> EntityStore<G, C> {
    /// Loads every collection. Keys that were never written are filled with
    /// the built-in dataset, which is flushed before `open` returns.
    ///
    /// # Errors
    /// - `Persistence` when a stored record cannot be read or decoded, or the
    ///   built-in dataset cannot be written.
    pub fn open(gateway: G, clock: C) -> StoreResult<Self> {
        let mut seeded = Vec::new();
        let notices: Vec<Notice> =
            load_or_seed(&gateway, StorageKey::Notices, seed::default_notices, &mut seeded)?;
        let posts: Vec<Post> =
            load_or_seed(&gateway, StorageKey::Posts, seed::default_posts, &mut seeded)?;
        let schedule: Vec<ScheduleEntry> =
            load_or_seed(&gateway, StorageKey::Schedule, seed::default_schedule, &mut seeded)?;
        let worship_info: WorshipInfo = load_or_seed(
            &gateway,
            StorageKey::WorshipInfo,
            seed::default_worship_info,
            &mut seeded,
        )?;
        let attendance: Vec<AttendanceRecord> =
            load_or_seed(&gateway, StorageKey::Attendance, Vec::new, &mut seeded)?;

        if !seeded.is_empty() {
            if let Err(err) = gateway.save_all(&seeded) {
                warn!("event=store_seed module=store status=error error={err}");
                return Err(err.into());
            }
            info!("event=store_seed module=store status=ok keys={}", seeded.len());
        }

        let ids = IdGenerator::new();
        for notice in &notices {
            ids.observe(&notice.id);
        }
        for post in &posts {
            ids.observe(&post.id);
            for comment in &post.comments {
                ids.observe(&comment.id);
            }
        }
        for record in &attendance {
            ids.observe(&record.id);
        }

        info!(
            "event=store_open module=store status=ok notices={} posts={} schedule_rows={} attendance={}",
            notices.len(),
            posts.len(),
            schedule.len(),
            attendance.len()
        );

        Ok(Self {
            gateway,
            clock,
            ids,
            notices,
            posts,
            schedule,
            worship_info,
            attendance,
        })
    }

    /// Tears the store down and hands back the gateway.
    pub fn close(self) -> G {
        info!("event=store_close module=store status=ok");
        self.gateway
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Newest `limit` notices, as shown on the home screen.
    pub fn latest_notices(&self, limit: usize) -> &[Notice] {
        &self.notices[..limit.min(self.notices.len())]
    }

    pub fn notice(&self, id: &str) -> Option<&Notice> {
        self.notices.iter().find(|notice| notice.id == id)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_by_category(&self, filter: PostFilter) -> Vec<&Post> {
        self.posts.iter().filter(|post| filter.matches(post)).collect()
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.schedule
    }

    pub fn worship_info(&self) -> &WorshipInfo {
        &self.worship_info
    }

    pub fn attendance_on(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|record| record.date == date)
            .collect()
    }

    pub fn dashboard_summary(&self, actor: &Session) -> StoreResult<DashboardSummary> {
        self.authorize(actor, Capability::AccessAdminDashboard)?;
        Ok(DashboardSummary {
            notice_count: self.notices.len(),
            post_count: self.posts.len(),
            attendance_today: self.attendance_on(self.clock.today()).len(),
        })
    }

    /// Creates a notice dated today and authored by `actor`, newest first.
    pub fn create_notice(&mut self, actor: &Session, draft: NoticeDraft) -> StoreResult<Notice> {
        self.authorize(actor, Capability::ManageNotices)?;
        require_title_and_content(&draft.title, &draft.content)?;

        let now = self.clock.now();
        let notice = Notice {
            id: self.ids.next_id(now),
            title: draft.title,
            content: draft.content,
            date: now.date_naive(),
            author: actor.name.clone(),
            category: draft.category,
            image_url: draft.image_url,
        };

        let mut next = Vec::with_capacity(self.notices.len() + 1);
        next.push(notice.clone());
        next.extend(self.notices.iter().cloned());
        self.notices = self.persist(StorageKey::Notices, next)?;

        info!(
            "event=notice_create module=store status=ok id={} actor_role={}",
            notice.id,
            actor.role.as_str()
        );
        Ok(notice)
    }

    /// Applies `patch` in place; position, id, date and author are kept.
    pub fn update_notice(
        &mut self,
        actor: &Session,
        id: &str,
        patch: &NoticePatch,
    ) -> StoreResult<Notice> {
        self.authorize(actor, Capability::ManageNotices)?;
        let index = self.notice_index(id)?;
        let updated = patch.apply_to(&self.notices[index]);
        require_title_and_content(&updated.title, &updated.content)?;

        let mut next = self.notices.clone();
        next[index] = updated.clone();
        self.notices = self.persist(StorageKey::Notices, next)?;

        info!("event=notice_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Removes a notice and returns it.
    pub fn delete_notice(&mut self, actor: &Session, id: &str) -> StoreResult<Notice> {
        self.authorize(actor, Capability::ManageNotices)?;
        let index = self.notice_index(id)?;

        let mut next = self.notices.clone();
        let removed = next.remove(index);
        self.notices = self.persist(StorageKey::Notices, next)?;

        info!("event=notice_delete module=store status=ok id={id}");
        Ok(removed)
    }

    /// Creates a post with no likes and no comments, newest first.
    pub fn create_post(&mut self, actor: &Session, draft: PostDraft) -> StoreResult<Post> {
        self.authorize(actor, Capability::Participate)?;
        require_title_and_content(&draft.title, &draft.content)?;

        let now = self.clock.now();
        let post = Post {
            id: self.ids.next_id(now),
            title: draft.title,
            content: draft.content,
            author_id: actor.id.clone(),
            author_name: actor.name.clone(),
            category: draft.category,
            created_at: now,
            likes: 0,
            comments: Vec::new(),
        };

        let mut next = Vec::with_capacity(self.posts.len() + 1);
        next.push(post.clone());
        next.extend(self.posts.iter().cloned());
        self.posts = self.persist(StorageKey::Posts, next)?;

        info!("event=post_create module=store status=ok id={}", post.id);
        Ok(post)
    }

    /// Adds exactly one like. Repeated calls from the same actor all count.
    pub fn toggle_like(&mut self, actor: &Session, post_id: &str) -> StoreResult<Post> {
        self.authorize(actor, Capability::Participate)?;
        let index = self.post_index(post_id)?;

        let mut next = self.posts.clone();
        next[index].likes += 1;
        let liked = next[index].clone();
        self.posts = self.persist(StorageKey::Posts, next)?;

        info!(
            "event=post_like module=store status=ok id={post_id} likes={}",
            liked.likes
        );
        Ok(liked)
    }

    /// Appends a comment by `actor`.
    ///
    /// Blank content is a no-op: the post is returned unchanged and nothing
    /// is written.
    pub fn append_comment(
        &mut self,
        actor: &Session,
        post_id: &str,
        content: &str,
    ) -> StoreResult<Post> {
        self.authorize(actor, Capability::Participate)?;
        let index = self.post_index(post_id)?;
        if content.trim().is_empty() {
            return Ok(self.posts[index].clone());
        }

        let now = self.clock.now();
        let comment = Comment {
            id: self.ids.next_id(now),
            author_name: actor.name.clone(),
            content: content.to_string(),
            created_at: now,
        };

        let mut next = self.posts.clone();
        next[index].comments.push(comment);
        let commented = next[index].clone();
        self.posts = self.persist(StorageKey::Posts, next)?;

        info!(
            "event=comment_append module=store status=ok post_id={post_id} comments={}",
            commented.comments.len()
        );
        Ok(commented)
    }

    /// Opens a draft over the published schedule and worship info.
    pub fn open_draft(&self, actor: &Session) -> StoreResult<DraftSession> {
        self.authorize(actor, Capability::EditSchedule)?;
        Ok(DraftSession::open(&self.schedule, &self.worship_info))
    }

    /// Replaces schedule and worship info with the draft as one unit.
    ///
    /// # Errors
    /// - `Persistence` when either record fails to write; both slices are
    ///   then restored to their pre-publish values.
    pub fn publish(&mut self, actor: &Session, draft: DraftSession) -> StoreResult<()> {
        self.authorize(actor, Capability::EditSchedule)?;
        let (schedule, worship_info) = draft.into_parts();
        let entries = [
            (
                StorageKey::Schedule,
                encode_record(StorageKey::Schedule, &schedule)?,
            ),
            (
                StorageKey::WorshipInfo,
                encode_record(StorageKey::WorshipInfo, &worship_info)?,
            ),
        ];

        let prior_schedule = std::mem::replace(&mut self.schedule, schedule);
        let prior_worship = std::mem::replace(&mut self.worship_info, worship_info);

        if let Err(err) = self.gateway.save_all(&entries) {
            self.schedule = prior_schedule;
            self.worship_info = prior_worship;
            warn!(
                "event=draft_publish module=store status=error rolled_back=true error={}",
                err
            );
            return Err(err.into());
        }

        info!(
            "event=draft_publish module=store status=ok schedule_rows={} actor_role={}",
            self.schedule.len(),
            actor.role.as_str()
        );
        Ok(())
    }

    /// Records today's attendance for `actor`.
    ///
    /// A member who already checked in today gets the existing record back.
    pub fn check_in(&mut self, actor: &Session) -> StoreResult<AttendanceRecord> {
        self.authorize(actor, Capability::Participate)?;
        let now = self.clock.now();
        let today = now.date_naive();

        if let Some(existing) = self
            .attendance
            .iter()
            .find(|record| record.date == today && record.user_name == actor.name)
        {
            return Ok(existing.clone());
        }

        let record = AttendanceRecord {
            id: self.ids.next_id(now),
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            date: today,
            status: AttendanceStatus::Present,
        };

        let mut next = self.attendance.clone();
        next.push(record.clone());
        self.attendance = self.persist(StorageKey::Attendance, next)?;

        info!("event=attendance_check_in module=store status=ok id={}", record.id);
        Ok(record)
    }

    fn authorize(&self, actor: &Session, capability: Capability) -> StoreResult<()> {
        authorize(actor, capability).map_err(|denied| {
            warn!(
                "event=access_denied module=store role={} capability={}",
                denied.role.as_str(),
                denied.capability.as_str()
            );
            StoreError::from(denied)
        })
    }

    /// Writes `next` and returns it for the caller to swap in.
    fn persist<T: Serialize>(&self, key: StorageKey, next: T) -> StoreResult<T> {
        if let Err(err) = save_record(&self.gateway, key, &next) {
            warn!("event=record_persist module=store status=error key={key} error={err}");
            return Err(err.into());
        }
        Ok(next)
    }

    fn notice_index(&self, id: &str) -> StoreResult<usize> {
        self.notices
            .iter()
            .position(|notice| notice.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Notice,
                id: id.to_string(),
            })
    }

    fn post_index(&self, id: &str) -> StoreResult<usize> {
        self.posts
            .iter()
            .position(|post| post.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Post,
                id: id.to_string(),
            })
    }
}

/// Loads `key`, or encodes `default()` into `seeded` when it was never written.
fn load_or_seed<T, G>(
    gateway: &G,
    key: StorageKey,
    default: impl FnOnce() -> T,
    seeded: &mut Vec<(StorageKey, Vec<u8>)>,
) -> StoreResult<T>
where
    T: DeserializeOwned + Serialize,
    G: PersistenceGateway,
{
    if let Some(value) = load_record(gateway, key)? {
        return Ok(value);
    }
    let value = default();
    seeded.push((key, encode_record(key, &value)?));
    Ok(value)
}
