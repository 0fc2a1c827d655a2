//! Typed read/write access to the persisted document.
//!
//! Every operation is a whole-document read-modify-write against the
//! injected backend: load, change the in-memory copy, write everything back.
//! There is no locking; the last writer wins.

use crate::core::calculator::notifications::push_notification;
use crate::db::backend::StorageBackend;
use crate::db::log::log_action;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Document;
use crate::models::activity_log::ActivityLog;
use crate::models::branch::Branch;
use crate::models::message::{MANAGER_ID, Message, MessageType, Participant};
use crate::models::notification::{Category, Notification, NotificationDraft, Severity};
use crate::models::supervisor::{Permission, Supervisor};
use crate::models::worker::Worker;
use crate::utils::ids::next_id;
use chrono::NaiveDateTime;

pub const DEFAULT_STORAGE_KEY: &str = "SamiProERP_Final";

/// Repository over the SQLite key-value table used by the CLI.
pub type SqliteRepository = Repository<DbPool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Worker,
    Supervisor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStats {
    pub workers: usize,
    pub logs: usize,
    pub supervisors: usize,
    pub size_kb: f64,
}

/// Login names share one namespace: the manager, supervisor usernames and
/// worker iqama numbers.
pub fn is_username_taken(
    doc: &Document,
    username: &str,
    exclude_id: Option<&str>,
    manager_username: &str,
) -> bool {
    if username == manager_username {
        return true;
    }
    let other = |id: &str| exclude_id != Some(id);
    doc.supervisors
        .iter()
        .any(|s| s.username == username && other(&s.id))
        || doc
            .workers
            .iter()
            .any(|w| w.iqama == username && other(&w.id))
}

/// Workers and supervisors draw ids from one sequence so that a bare id
/// names a single account (messages address accounts by id).
pub fn next_account_id(doc: &Document) -> String {
    next_id(
        doc.workers
            .iter()
            .map(|w| w.id.as_str())
            .chain(doc.supervisors.iter().map(|s| s.id.as_str())),
    )
}

pub struct Repository<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> Repository<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ---------------------------
    // Whole document
    // ---------------------------

    /// Read the document, creating and persisting the initial one if absent.
    pub fn load(&mut self) -> AppResult<Document> {
        match self.backend.get_item(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let doc = Document::default();
                self.save(&doc)?;
                Ok(doc)
            }
        }
    }

    pub fn save(&mut self, doc: &Document) -> AppResult<()> {
        let raw = serde_json::to_string(doc)?;
        self.backend.set_item(&self.key, &raw)
    }

    /// Read-modify-write. Nothing is written when `f` fails.
    pub fn mutate<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Document) -> AppResult<T>,
    {
        let mut doc = self.load()?;
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }

    /// Drop the stored document; the next load starts from scratch.
    pub fn reset(&mut self) -> AppResult<()> {
        self.backend.remove_item(&self.key)
    }

    pub fn export_json(&mut self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.load()?)?)
    }

    /// Replace the stored document with an imported one.
    ///
    /// The only structural requirement is non-null `workers` and
    /// `supervisors`; on rejection the stored document is left untouched.
    pub fn import_json(&mut self, raw: &str) -> AppResult<()> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| AppError::ImportFormat(format!("not a JSON document ({e})")))?;

        for field in ["workers", "supervisors"] {
            if value.get(field).is_none_or(|v| v.is_null()) {
                return Err(AppError::ImportFormat(format!(
                    "missing '{field}' collection"
                )));
            }
        }

        let doc: Document =
            serde_json::from_value(value).map_err(|e| AppError::ImportFormat(e.to_string()))?;
        self.save(&doc)
    }

    pub fn stats(&mut self) -> AppResult<DocumentStats> {
        let doc = self.load()?;
        let size = serde_json::to_string(&doc)?.len();
        Ok(DocumentStats {
            workers: doc.workers.len(),
            logs: doc.logs.len(),
            supervisors: doc.supervisors.len(),
            size_kb: size as f64 / 1024.0,
        })
    }

    // ---------------------------
    // Workers
    // ---------------------------

    pub fn workers(&mut self) -> AppResult<Vec<Worker>> {
        Ok(self.load()?.workers)
    }

    pub fn worker(&mut self, id: &str) -> AppResult<Worker> {
        self.load()?
            .worker(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Worker", id))
    }

    /// Insert or replace a worker by id. Returns true when the worker is new.
    ///
    /// A new worker without a password gets the mobile number as password and
    /// raises a "New worker" notification.
    pub fn save_worker(&mut self, mut worker: Worker, now: NaiveDateTime) -> AppResult<bool> {
        self.mutate(|doc| {
            if let Some(existing) = doc.worker_mut(&worker.id) {
                *existing = worker;
                return Ok(false);
            }

            if worker.password.is_none() {
                worker.password = Some(worker.mobile.clone());
            }
            let message = format!("Worker {} was added to the system", worker.name);
            doc.workers.push(worker);
            push_notification(
                &mut doc.notifications,
                NotificationDraft::new("New worker", message)
                    .category(Category::System)
                    .target("workers"),
                now,
            );
            Ok(true)
        })
    }

    pub fn delete_worker(&mut self, id: &str) -> AppResult<Worker> {
        self.mutate(|doc| {
            let idx = doc
                .workers
                .iter()
                .position(|w| w.id == id)
                .ok_or_else(|| AppError::not_found("Worker", id))?;
            Ok(doc.workers.remove(idx))
        })
    }

    // ---------------------------
    // Branches
    // ---------------------------

    pub fn branches(&mut self) -> AppResult<Vec<Branch>> {
        Ok(self.load()?.branches)
    }

    pub fn add_branch(&mut self, name: &str, location: Option<&str>) -> AppResult<Branch> {
        self.mutate(|doc| {
            let branch = Branch {
                id: next_id(doc.branches.iter().map(|b| b.id.as_str())),
                name: name.to_string(),
                location: location.map(str::to_string),
            };
            doc.branches.push(branch.clone());
            Ok(branch)
        })
    }

    pub fn delete_branch(&mut self, id: &str) -> AppResult<Branch> {
        self.mutate(|doc| {
            let idx = doc
                .branches
                .iter()
                .position(|b| b.id == id)
                .ok_or_else(|| AppError::not_found("Branch", id))?;
            Ok(doc.branches.remove(idx))
        })
    }

    // ---------------------------
    // Notifications
    // ---------------------------

    pub fn notifications(&mut self) -> AppResult<Vec<Notification>> {
        Ok(self.load()?.notifications)
    }

    /// Store `draft` unless it duplicates a notification of the same day.
    /// The document is only written when something was inserted.
    pub fn add_notification(
        &mut self,
        draft: NotificationDraft,
        now: NaiveDateTime,
    ) -> AppResult<Option<String>> {
        let mut doc = self.load()?;
        let id = push_notification(&mut doc.notifications, draft, now);
        if id.is_some() {
            self.save(&doc)?;
        }
        Ok(id)
    }

    pub fn delete_notification(&mut self, id: &str) -> AppResult<()> {
        self.mutate(|doc| {
            let before = doc.notifications.len();
            doc.notifications.retain(|n| n.id != id);
            if doc.notifications.len() == before {
                return Err(AppError::not_found("Notification", id));
            }
            Ok(())
        })
    }

    pub fn delete_all_notifications(&mut self) -> AppResult<usize> {
        self.mutate(|doc| Ok(std::mem::take(&mut doc.notifications).len()))
    }

    /// Mark every notification as read; returns how many were unread.
    pub fn mark_notifications_read(&mut self) -> AppResult<usize> {
        self.mutate(|doc| {
            let mut changed = 0;
            for n in doc.notifications.iter_mut().filter(|n| !n.read) {
                n.read = true;
                changed += 1;
            }
            Ok(changed)
        })
    }

    // ---------------------------
    // Supervisors
    // ---------------------------

    pub fn supervisors(&mut self) -> AppResult<Vec<Supervisor>> {
        Ok(self.load()?.supervisors)
    }

    /// Self-registration: the account starts unapproved with no permissions.
    pub fn register_supervisor(
        &mut self,
        name: &str,
        username: &str,
        password: &str,
        manager_username: &str,
        now: NaiveDateTime,
    ) -> AppResult<Supervisor> {
        self.mutate(|doc| {
            if is_username_taken(doc, username, None, manager_username) {
                return Err(AppError::UsernameTaken(username.to_string()));
            }

            let supervisor = Supervisor {
                id: next_account_id(doc),
                name: name.to_string(),
                username: username.to_string(),
                password: password.to_string(),
                approved: false,
                permissions: Vec::new(),
                created_at: now,
            };
            doc.supervisors.push(supervisor.clone());
            push_notification(
                &mut doc.notifications,
                NotificationDraft::new(
                    "Registration request",
                    format!("New supervisor request: {name}"),
                )
                .severity(Severity::Warning)
                .category(Category::System)
                .target("user-management"),
                now,
            );
            Ok(supervisor)
        })
    }

    pub fn set_supervisor_approval(&mut self, id: &str, approved: bool) -> AppResult<Supervisor> {
        self.mutate(|doc| {
            let s = doc
                .supervisor_mut(id)
                .ok_or_else(|| AppError::not_found("Supervisor", id))?;
            s.approved = approved;
            Ok(s.clone())
        })
    }

    pub fn update_supervisor_permissions(
        &mut self,
        id: &str,
        permissions: Vec<Permission>,
    ) -> AppResult<Supervisor> {
        self.mutate(|doc| {
            let s = doc
                .supervisor_mut(id)
                .ok_or_else(|| AppError::not_found("Supervisor", id))?;
            s.permissions = permissions;
            Ok(s.clone())
        })
    }

    pub fn delete_supervisor(&mut self, id: &str) -> AppResult<Supervisor> {
        self.mutate(|doc| {
            let idx = doc
                .supervisors
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| AppError::not_found("Supervisor", id))?;
            Ok(doc.supervisors.remove(idx))
        })
    }

    pub fn username_taken(
        &mut self,
        username: &str,
        exclude_id: Option<&str>,
        manager_username: &str,
    ) -> AppResult<bool> {
        let doc = self.load()?;
        Ok(is_username_taken(&doc, username, exclude_id, manager_username))
    }

    pub fn update_password(
        &mut self,
        id: &str,
        kind: AccountKind,
        new_password: &str,
    ) -> AppResult<()> {
        self.mutate(|doc| match kind {
            AccountKind::Worker => {
                let w = doc
                    .worker_mut(id)
                    .ok_or_else(|| AppError::not_found("Worker", id))?;
                w.password = Some(new_password.to_string());
                Ok(())
            }
            AccountKind::Supervisor => {
                let s = doc
                    .supervisor_mut(id)
                    .ok_or_else(|| AppError::not_found("Supervisor", id))?;
                s.password = new_password.to_string();
                Ok(())
            }
        })
    }

    // ---------------------------
    // Messages
    // ---------------------------

    pub fn messages(&mut self) -> AppResult<Vec<Message>> {
        Ok(self.load()?.messages)
    }

    /// Newest messages are kept first. Messages to the manager raise a
    /// notification.
    pub fn send_message(
        &mut self,
        from: &Participant,
        to: &Participant,
        content: &str,
        kind: MessageType,
        now: NaiveDateTime,
    ) -> AppResult<Message> {
        self.mutate(|doc| {
            let msg = Message {
                id: next_id(doc.messages.iter().map(|m| m.id.as_str())),
                from_id: from.id.clone(),
                from_name: from.name.clone(),
                from_role: from.role,
                to_id: to.id.clone(),
                to_name: to.name.clone(),
                content: content.to_string(),
                date: now,
                read: false,
                kind,
            };
            doc.messages.insert(0, msg.clone());

            if to.id == MANAGER_ID {
                push_notification(
                    &mut doc.notifications,
                    NotificationDraft::new("New message", format!("Message from {}", from.name))
                        .category(Category::Message)
                        .target("messages"),
                    now,
                );
            }
            Ok(msg)
        })
    }

    /// Mark everything `other_id` sent to `reader_id` as read.
    pub fn mark_conversation_read(&mut self, reader_id: &str, other_id: &str) -> AppResult<usize> {
        self.mutate(|doc| {
            let mut changed = 0;
            for m in doc
                .messages
                .iter_mut()
                .filter(|m| m.from_id == other_id && m.to_id == reader_id && !m.read)
            {
                m.read = true;
                changed += 1;
            }
            Ok(changed)
        })
    }

    // ---------------------------
    // Activity log
    // ---------------------------

    pub fn logs(&mut self) -> AppResult<Vec<ActivityLog>> {
        Ok(self.load()?.logs)
    }

    pub fn log_action(
        &mut self,
        action: &str,
        user: &str,
        details: Option<&str>,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        self.mutate(|doc| {
            log_action(doc, now, action, user, details);
            Ok(())
        })
    }

    pub fn clear_logs(&mut self) -> AppResult<usize> {
        self.mutate(|doc| Ok(std::mem::take(&mut doc.logs).len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::log::MAX_LOGS;
    use crate::models::message::Role;
    use chrono::NaiveDate;

    const MANAGER: &str = "2298305398";

    fn repo() -> Repository<MemoryStorage> {
        Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
    }

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn worker(id: &str, iqama: &str) -> Worker {
        Worker {
            id: id.to_string(),
            name: format!("Worker {id}"),
            branch: "Jeddah Branch".into(),
            iqama: iqama.to_string(),
            mobile: "0550000000".into(),
            pay_day: 28,
            base_salary: 3000.0,
            ..Default::default()
        }
    }

    #[test]
    fn first_load_persists_initial_document() {
        let mut r = repo();
        let doc = r.load().unwrap();
        assert!(doc.workers.is_empty());
        assert_eq!(doc.branches.len(), 5);
        assert!(r.backend().get_item(DEFAULT_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn failed_mutation_writes_nothing() {
        let mut r = repo();
        r.save_worker(worker("1", "111"), at(1)).unwrap();
        let res: AppResult<()> = r.mutate(|doc| {
            doc.workers.clear();
            Err(AppError::Validation("boom".into()))
        });
        assert!(res.is_err());
        assert_eq!(r.workers().unwrap().len(), 1);
    }

    #[test]
    fn new_worker_gets_mobile_password_and_notification() {
        let mut r = repo();
        assert!(r.save_worker(worker("1", "111"), at(1)).unwrap());
        let stored = r.worker("1").unwrap();
        assert_eq!(stored.password.as_deref(), Some("0550000000"));

        let notes = r.notifications().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "New worker");

        let mut edited = stored.clone();
        edited.name = "Renamed".into();
        assert!(!r.save_worker(edited, at(1)).unwrap());
        assert_eq!(r.worker("1").unwrap().name, "Renamed");
        assert_eq!(r.notifications().unwrap().len(), 1);
    }

    #[test]
    fn usernames_share_one_namespace() {
        let mut r = repo();
        r.save_worker(worker("1", "111"), at(1)).unwrap();
        r.register_supervisor("Sara", "sara", "pw", MANAGER, at(1))
            .unwrap();

        assert!(r.username_taken(MANAGER, None, MANAGER).unwrap());
        assert!(r.username_taken("111", None, MANAGER).unwrap());
        assert!(!r.username_taken("111", Some("1"), MANAGER).unwrap());
        assert!(r.username_taken("sara", None, MANAGER).unwrap());
        assert!(!r.username_taken("nobody", None, MANAGER).unwrap());

        let dup = r.register_supervisor("Other", "111", "pw", MANAGER, at(1));
        assert!(matches!(dup, Err(AppError::UsernameTaken(_))));
        assert_eq!(r.supervisors().unwrap().len(), 1);
    }

    #[test]
    fn registered_supervisor_starts_unapproved() {
        let mut r = repo();
        let s = r
            .register_supervisor("Sara", "sara", "pw", MANAGER, at(1))
            .unwrap();
        assert!(!s.approved);
        assert!(s.permissions.is_empty());
        assert_eq!(r.notifications().unwrap()[0].severity, Severity::Warning);

        r.set_supervisor_approval(&s.id, true).unwrap();
        r.update_supervisor_permissions(&s.id, vec![Permission::ViewReports])
            .unwrap();
        let stored = &r.supervisors().unwrap()[0];
        assert!(stored.approved);
        assert!(stored.has(Permission::ViewReports));
    }

    #[test]
    fn import_requires_workers_and_supervisors() {
        let mut r = repo();
        r.save_worker(worker("1", "111"), at(1)).unwrap();

        let err = r.import_json(r#"{"workers": [], "supervisors": null}"#);
        assert!(matches!(err, Err(AppError::ImportFormat(_))));
        let err = r.import_json("not json");
        assert!(matches!(err, Err(AppError::ImportFormat(_))));
        assert_eq!(r.workers().unwrap().len(), 1);
    }

    #[test]
    fn import_accepts_browser_backup_shape() {
        let mut r = repo();
        let raw = r#"{
            "workers": [{
                "id": "1700000000000", "name": "Ali", "branch": "Jeddah Branch",
                "jobTitle": "Driver", "iqama": "2400000001", "iqamaExpiryDate": "",
                "mobile": "0551234567", "bankName": "", "accountNumber": "",
                "joinDate": "2024-01-01T00:00:00.000Z", "payDay": 27,
                "baseSalary": 3000, "housingAllowance": 500, "transportAllowance": 200,
                "activeLoan": 0, "absencesThisMonth": 0, "overtimeHours": 0,
                "payments": [{
                    "id": "1", "date": "2025-05-27T09:00:00.000Z", "amount": 3700,
                    "type": "SALARY",
                    "details": {"baseSalary": 3000, "housing": 500, "transport": 200,
                        "overtime": 0, "bonuses": 0, "absencesDeduction": 0, "loanDeduction": 0}
                }]
            }],
            "supervisors": [],
            "logs": []
        }"#;
        r.import_json(raw).unwrap();

        let doc = r.load().unwrap();
        assert_eq!(doc.workers[0].payments[0].amount, 3700.0);
        assert_eq!(doc.branches.len(), 5);
        assert!(doc.notifications.is_empty());
    }

    #[test]
    fn export_then_import_keeps_document() {
        let mut r = repo();
        r.save_worker(worker("1", "111"), at(1)).unwrap();
        r.log_action("CREATE_WORKER", "manager", Some("Worker 1"), at(1))
            .unwrap();
        let before = r.load().unwrap();

        let json = r.export_json().unwrap();
        let mut other = repo();
        other.import_json(&json).unwrap();
        assert_eq!(other.load().unwrap(), before);
    }

    #[test]
    fn activity_log_is_newest_first_and_capped() {
        let mut r = repo();
        let mut doc = r.load().unwrap();
        for i in 0..(MAX_LOGS + 5) {
            log_action(&mut doc, at(1), "TEST", "manager", Some(&i.to_string()));
        }
        r.save(&doc).unwrap();

        let logs = r.logs().unwrap();
        assert_eq!(logs.len(), MAX_LOGS);
        assert_eq!(logs[0].details.as_deref(), Some("1004"));
        assert_eq!(r.clear_logs().unwrap(), MAX_LOGS);
        assert!(r.logs().unwrap().is_empty());
    }

    #[test]
    fn message_to_manager_raises_notification() {
        let mut r = repo();
        let ali = Participant {
            id: "1".into(),
            name: "Ali".into(),
            role: Role::Worker,
        };
        r.send_message(&ali, &Participant::manager(), "hello", MessageType::General, at(1))
            .unwrap();
        r.send_message(&Participant::manager(), &ali, "hi", MessageType::General, at(1))
            .unwrap();

        let msgs = r.messages().unwrap();
        assert_eq!(msgs[0].content, "hi");
        let notes = r.notifications().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].category, Category::Message);

        assert_eq!(r.mark_conversation_read(MANAGER_ID, "1").unwrap(), 1);
        assert_eq!(r.mark_conversation_read(MANAGER_ID, "1").unwrap(), 0);
    }

    #[test]
    fn reset_starts_over() {
        let mut r = repo();
        r.save_worker(worker("1", "111"), at(1)).unwrap();
        r.reset().unwrap();
        assert!(r.workers().unwrap().is_empty());
    }

    #[test]
    fn stats_count_collections() {
        let mut r = repo();
        r.save_worker(worker("1", "111"), at(1)).unwrap();
        let stats = r.stats().unwrap();
        assert_eq!(stats.workers, 1);
        assert_eq!(stats.supervisors, 0);
        assert!(stats.size_kb > 0.0);
    }
}
