use crate::cli::parser::{Commands, MsgCmd};
use crate::core::context::AppContext;
use crate::core::message::MessageLogic;
use crate::errors::AppResult;
use crate::models::message::MessageType;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{CYAN, GREY, RESET, YELLOW};
use crate::utils::date::format_timestamp;

const PREVIEW_CHARS: usize = 40;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Msg { action } = cmd {
        let (mut repo, actor) = ctx.session()?;

        match action {
            MsgCmd::Send { to, text, request } => {
                let kind = if *request {
                    MessageType::Request
                } else {
                    MessageType::General
                };
                let m = MessageLogic::send(&mut repo, &actor, to, text, kind, ctx.now)?;
                success(format!("Message sent to {}", m.to_name));
            }
            MsgCmd::Inbox => {
                let contacts = MessageLogic::inbox(&mut repo, &actor)?;
                if contacts.is_empty() {
                    info("No contacts available.");
                    return Ok(());
                }

                for c in contacts {
                    let badge = if c.unread > 0 {
                        format!(" {YELLOW}({} new){RESET}", c.unread)
                    } else {
                        String::new()
                    };
                    let last = match &c.last {
                        Some(m) => {
                            let mut text: String = m.content.chars().take(PREVIEW_CHARS).collect();
                            if m.content.chars().count() > PREVIEW_CHARS {
                                text.push('…');
                            }
                            format!("{GREY}{} · {}{RESET}", format_timestamp(&m.date), text)
                        }
                        None => format!("{GREY}no messages{RESET}"),
                    };
                    println!(
                        "{CYAN}{:>10}{RESET}  {} [{}]{}\n            {}",
                        c.participant.id,
                        c.participant.name,
                        c.participant.role.as_str(),
                        badge,
                        last
                    );
                }
            }
            MsgCmd::Chat { with } => {
                let chat = MessageLogic::conversation(&mut repo, &actor, with)?;
                if chat.is_empty() {
                    info("No messages yet.");
                    return Ok(());
                }

                header(format!("Conversation with {with}"));
                for m in chat {
                    let who = if m.from_id == actor.id() {
                        "you".to_string()
                    } else {
                        m.from_name.clone()
                    };
                    let tag = match m.kind {
                        MessageType::Request => " [request]",
                        MessageType::General => "",
                    };
                    println!(
                        "{GREY}{}{RESET} {CYAN}{}{RESET}{}: {}",
                        format_timestamp(&m.date),
                        who,
                        tag,
                        m.content
                    );
                }
            }
        }
    }

    Ok(())
}
