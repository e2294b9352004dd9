use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use notekit_runtime::state::{ProfileTab, ProfileView, SearchResults, Waterfall};
use notekit_types::{Category, CommentThread, NoteCard, NoteDetail, UserProfile};
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

const COLUMN_WIDTH: usize = 36;

static COLOR: Lazy<bool> = Lazy::new(|| std::io::stdout().is_terminal());

fn bold(text: &str) -> String {
    if *COLOR {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn dimmed(text: &str) -> String {
    if *COLOR {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn card_cell(card: &NoteCard) -> String {
    let like = if card.is_liked { "♥" } else { "♡" };
    let kind = if card.is_video { " [video]" } else { "" };
    format!(
        "{} {}{} {}{}",
        card.id,
        truncate(&card.title, 20),
        kind,
        like,
        card.like_count
    )
}

pub fn print_cards(cards: &[NoteCard], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(cards);
    }
    for card in cards {
        println!("{}  by {}", card_cell(card), card.author.nickname);
    }
    Ok(())
}

/// Two columns, filled the way the feed screen fills them.
pub fn print_waterfall(notes: &Waterfall, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({ "left": notes.left, "right": notes.right }));
    }
    if notes.is_empty() {
        println!("No notes yet");
        return Ok(());
    }
    for (row, left) in notes.left.iter().enumerate() {
        let right = notes.right.get(row).map(card_cell).unwrap_or_default();
        println!("{:<width$}  {}", card_cell(left), right, width = COLUMN_WIDTH);
    }
    Ok(())
}

pub fn print_categories(categories: &[Category], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(categories);
    }
    for (index, category) in categories.iter().enumerate() {
        println!("{:>2}  {} ({})", index, category.name, category.id);
    }
    Ok(())
}

pub fn print_detail(detail: &NoteDetail, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(detail);
    }
    println!("{}", bold(&detail.title));
    let following = if detail.author.is_following {
        " (following)"
    } else {
        ""
    };
    println!("by {}{}", detail.author.nickname, following);
    if !detail.content.is_empty() {
        println!("\n{}\n", detail.content);
    }
    if detail.is_video() {
        println!("video: {}", detail.video_url);
    }
    for image in &detail.images {
        println!("image: {}", image);
    }
    println!(
        "likes {}{}  collects {}{}  comments {}",
        detail.like_count,
        if detail.is_liked { " (you)" } else { "" },
        detail.collect_count,
        if detail.is_collected { " (you)" } else { "" },
        detail.comment_count
    );
    Ok(())
}

pub fn print_threads(threads: &[CommentThread], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(threads);
    }
    if threads.is_empty() {
        println!("No comments yet");
        return Ok(());
    }
    for thread in threads {
        let comment = &thread.comment;
        println!(
            "{} {}  {}",
            bold(&comment.author.nickname),
            dimmed(&comment.display_time),
            comment.content
        );
        for reply in &thread.replies {
            println!(
                "    ↳ {} {}  {}",
                bold(&reply.author.nickname),
                dimmed(&reply.display_time),
                reply.content
            );
        }
    }
    Ok(())
}

pub fn print_search(results: &SearchResults, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({
            "keyword": results.keyword,
            "total": results.total,
            "currentPage": results.current_page,
            "totalPages": results.total_pages,
            "notes": results.notes,
        }));
    }
    println!("{} result(s) for \"{}\"", results.total, results.keyword);
    print_cards(&results.notes, format)
}

pub fn print_user(user: &UserProfile, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(user);
    }
    let nickname = if user.nickname.is_empty() {
        "Nickname not set"
    } else {
        user.nickname.as_str()
    };
    println!("{} ({})", bold(nickname), user.id);
    if !user.signature.is_empty() {
        println!("{}", user.signature);
    }
    println!(
        "following {}  fans {}  likes & collects {}",
        user.stats.follow_count, user.stats.fans_count, user.stats.like_collect_count
    );
    Ok(())
}

pub fn print_profile(view: &ProfileView, tab: ProfileTab, format: OutputFormat) -> Result<()> {
    let list = view.tab(tab);
    if format == OutputFormat::Json {
        return print_json(&json!({
            "user": view.user,
            "tab": tab.label(),
            "hasMore": list.has_more,
            "notes": list.notes.items,
        }));
    }
    println!("{}", bold(view.nickname()));
    println!("{}", view.bio());
    println!("\n{}", dimmed(tab.label()));
    print_waterfall(&list.notes, format)
}
