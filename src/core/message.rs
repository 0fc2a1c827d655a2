use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::Document;
use crate::models::message::{MANAGER_ID, Message, MessageType, Participant, Role};
use chrono::NaiveDateTime;

/// A conversation partner with the latest message and unread count.
#[derive(Debug, Clone)]
pub struct Contact {
    pub participant: Participant,
    pub last: Option<Message>,
    pub unread: usize,
}

/// Resolve a recipient id: `manager`, a worker id or a supervisor id.
pub fn resolve(doc: &Document, id: &str) -> AppResult<Participant> {
    if id == MANAGER_ID {
        return Ok(Participant::manager());
    }
    if let Some(w) = doc.worker(id) {
        return Ok(Participant {
            id: w.id.clone(),
            name: w.name.clone(),
            role: Role::Worker,
        });
    }
    if let Some(s) = doc.supervisor(id) {
        return Ok(Participant {
            id: s.id.clone(),
            name: s.name.clone(),
            role: Role::Supervisor,
        });
    }
    Err(AppError::not_found("Recipient", id))
}

/// Who `actor` may talk to. Workers reach the manager and approved
/// supervisors; staff also reach every worker.
pub fn contacts_for(doc: &Document, actor: &Actor) -> Vec<Participant> {
    let mut list = Vec::new();
    if !matches!(actor, Actor::Manager) {
        list.push(Participant::manager());
    }
    list.extend(
        doc.supervisors
            .iter()
            .filter(|s| s.approved && s.id != actor.id())
            .map(|s| Participant {
                id: s.id.clone(),
                name: s.name.clone(),
                role: Role::Supervisor,
            }),
    );
    if !matches!(actor, Actor::Worker(_)) {
        list.extend(doc.workers.iter().map(|w| Participant {
            id: w.id.clone(),
            name: w.name.clone(),
            role: Role::Worker,
        }));
    }
    list
}

pub struct MessageLogic;

impl MessageLogic {
    pub fn send<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        to: &str,
        content: &str,
        kind: MessageType,
        now: NaiveDateTime,
    ) -> AppResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("message is empty".into()));
        }

        let doc = repo.load()?;
        let recipient = resolve(&doc, to)?;
        if !contacts_for(&doc, actor).iter().any(|c| c.id == recipient.id) {
            return Err(AppError::PermissionDenied(format!(
                "cannot message {}",
                recipient.name
            )));
        }

        repo.send_message(&actor.participant(), &recipient, content, kind, now)
    }

    /// Contacts ordered by most recent activity.
    pub fn inbox<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
    ) -> AppResult<Vec<Contact>> {
        let doc = repo.load()?;
        let me = actor.id();

        let mut contacts: Vec<Contact> = contacts_for(&doc, actor)
            .into_iter()
            .map(|p| {
                // messages are stored newest first
                let last = doc.messages.iter().find(|m| m.between(me, &p.id)).cloned();
                let unread = doc
                    .messages
                    .iter()
                    .filter(|m| m.from_id == p.id && m.to_id == me && !m.read)
                    .count();
                Contact {
                    participant: p,
                    last,
                    unread,
                }
            })
            .collect();

        contacts.sort_by(|a, b| {
            let ta = a.last.as_ref().map(|m| m.date);
            let tb = b.last.as_ref().map(|m| m.date);
            tb.cmp(&ta)
        });
        Ok(contacts)
    }

    /// The conversation with `other`, oldest first. Opening it marks the
    /// incoming messages as read.
    pub fn conversation<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        other: &str,
    ) -> AppResult<Vec<Message>> {
        let me = actor.id().to_string();
        let mut chat: Vec<Message> = repo
            .messages()?
            .into_iter()
            .filter(|m| m.between(&me, other))
            .collect();
        chat.reverse();

        repo.mark_conversation_read(&me, other)?;
        Ok(chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use crate::models::worker::Worker;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn seeded() -> (Repository<MemoryStorage>, Worker) {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let w = Worker {
            id: "1".into(),
            name: "Ali".into(),
            iqama: "111".into(),
            mobile: "055".into(),
            ..Default::default()
        };
        repo.save_worker(w.clone(), at(8)).unwrap();
        (repo, w)
    }

    #[test]
    fn worker_and_manager_exchange_messages() {
        let (mut repo, w) = seeded();
        let ali = Actor::Worker(w);

        MessageLogic::send(&mut repo, &ali, "manager", "salary question", MessageType::General, at(9))
            .unwrap();
        MessageLogic::send(&mut repo, &Actor::Manager, "1", "answer", MessageType::General, at(10))
            .unwrap();

        let inbox = MessageLogic::inbox(&mut repo, &Actor::Manager).unwrap();
        assert_eq!(inbox[0].participant.id, "1");
        assert_eq!(inbox[0].unread, 1);
        assert_eq!(inbox[0].last.as_ref().unwrap().content, "answer");

        let chat = MessageLogic::conversation(&mut repo, &Actor::Manager, "1").unwrap();
        assert_eq!(chat.len(), 2);
        assert_eq!(chat[0].content, "salary question");

        let inbox = MessageLogic::inbox(&mut repo, &Actor::Manager).unwrap();
        assert_eq!(inbox[0].unread, 0);
    }

    #[test]
    fn workers_cannot_message_other_workers() {
        let (mut repo, w) = seeded();
        let other = Worker {
            id: "2".into(),
            name: "Omar".into(),
            iqama: "222".into(),
            mobile: "056".into(),
            ..Default::default()
        };
        repo.save_worker(other, at(8)).unwrap();

        let res = MessageLogic::send(
            &mut repo,
            &Actor::Worker(w),
            "2",
            "hi",
            MessageType::General,
            at(9),
        );
        assert!(matches!(res, Err(AppError::PermissionDenied(_))));
    }

    #[test]
    fn unknown_recipient_is_reported() {
        let (mut repo, _) = seeded();
        let res = MessageLogic::send(
            &mut repo,
            &Actor::Manager,
            "42",
            "hi",
            MessageType::General,
            at(9),
        );
        assert!(matches!(res, Err(AppError::NotFound { .. })));
    }
}
