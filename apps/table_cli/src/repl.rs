//! Line-oriented command loop over a loaded table.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use shared::{
    domain::{CommentId, EditField},
    view::{PageSize, SortKey},
};
use table_core::TableController;

use crate::render::{render_footer, render_table};

const HELP: &str = "\
commands:
  search [TERM]        filter by name/email/body (empty clears)
  sort COLUMN          sort by id|name|email|body, again to reverse
  unsort               restore fetch order
  page N | next | prev move between pages
  size N|all           rows per page
  edit ID              copy a row into the edit buffer
  set FIELD VALUE      change name|email|body in the edit buffer
  save | cancel        commit or discard the edit buffer
  delete ID            remove a row
  show                 print the current page
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search(String),
    Sort(SortKey),
    Unsort,
    Page(usize),
    Next,
    Prev,
    Size(PageSize),
    Edit(CommentId),
    Set(EditField, String),
    Save,
    Cancel,
    Delete(CommentId),
    Show,
    Help,
    Quit,
}

fn parse_id(arg: &str) -> Result<CommentId, String> {
    arg.trim()
        .parse::<i64>()
        .map(CommentId)
        .map_err(|_| format!("expected a comment id, got '{}'", arg.trim()))
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match verb.to_ascii_lowercase().as_str() {
            "search" | "/" => Ok(ReplCommand::Search(rest.to_string())),
            "sort" => rest.parse().map(ReplCommand::Sort),
            "unsort" => Ok(ReplCommand::Unsort),
            "page" => rest
                .parse()
                .map(ReplCommand::Page)
                .map_err(|_| format!("expected a page number, got '{rest}'")),
            "next" | "n" => Ok(ReplCommand::Next),
            "prev" | "p" => Ok(ReplCommand::Prev),
            "size" => rest.parse().map(ReplCommand::Size),
            "edit" => parse_id(rest).map(ReplCommand::Edit),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                Ok(ReplCommand::Set(field.parse()?, value.trim().to_string()))
            }
            "save" => Ok(ReplCommand::Save),
            "cancel" => Ok(ReplCommand::Cancel),
            "delete" | "rm" => parse_id(rest).map(ReplCommand::Delete),
            "show" | "ls" | "" => Ok(ReplCommand::Show),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

pub enum Step {
    Print(String),
    Quit,
}

pub fn apply(table: &mut TableController, command: ReplCommand) -> Step {
    let message = match command {
        ReplCommand::Search(term) => {
            table.set_search_term(term);
            render_table(table)
        }
        ReplCommand::Sort(key) => {
            table.set_sort(key);
            render_table(table)
        }
        ReplCommand::Unsort => {
            table.clear_sort();
            render_table(table)
        }
        ReplCommand::Page(page) => {
            table.set_page(page);
            render_table(table)
        }
        ReplCommand::Next => {
            table.next_page();
            render_table(table)
        }
        ReplCommand::Prev => {
            table.previous_page();
            render_table(table)
        }
        ReplCommand::Size(page_size) => {
            table.set_page_size(page_size);
            render_table(table)
        }
        ReplCommand::Edit(id) => {
            if table.start_edit_by_id(id) {
                render_table(table)
            } else {
                format!("no comment with id {id}")
            }
        }
        ReplCommand::Set(field, value) => {
            if table.update_edit(field, value) {
                render_table(table)
            } else {
                "nothing is being edited; use 'edit ID' first".to_string()
            }
        }
        ReplCommand::Save => {
            if table.commit_edit() {
                render_table(table)
            } else {
                "nothing saved".to_string()
            }
        }
        ReplCommand::Cancel => {
            table.cancel_edit();
            render_footer(table)
        }
        ReplCommand::Delete(id) => {
            if table.delete(id) {
                render_table(table)
            } else {
                format!("no comment with id {id}")
            }
        }
        ReplCommand::Show => render_table(table),
        ReplCommand::Help => HELP.to_string(),
        ReplCommand::Quit => return Step::Quit,
    };
    Step::Print(message)
}

pub fn run<R: BufRead, W: Write>(
    table: &mut TableController,
    input: R,
    mut out: W,
) -> io::Result<()> {
    write!(out, "{}", render_table(table))?;
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        match line.parse::<ReplCommand>() {
            Ok(command) => {
                tracing::debug!(?command, "table command");
                match apply(table, command) {
                    Step::Print(message) => writeln!(out, "{message}")?,
                    Step::Quit => return Ok(()),
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}
