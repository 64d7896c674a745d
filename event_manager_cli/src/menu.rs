use event_manager_core::console::Console;
use event_manager_core::engine::flows::{self, Outcome};
use event_manager_core::prompt::select_index;
use event_manager_core::storage::{Store, TableKind};
use event_manager_core::{CoreError, Database};
use tracing::error;

#[derive(Debug, Clone, Copy)]
enum Action {
    Add,
    Delete,
    Update,
}

/// Top-level loop. Returns when the operator exits or input ends.
pub fn run<C: Console>(db: &Database, console: &mut C) -> Result<(), CoreError> {
    loop {
        console.write_line("\n\nEvent Manager");
        console.write_line("1. View Events");
        console.write_line("2. Data Manipulation");
        console.write_line("\n0. exit...");
        let Some(choice) = select_index(console, "> ", 2)? else {
            console.write_line("< closing application...");
            return Ok(());
        };
        let result = match choice {
            1 => flows::view_event(db.store(), console),
            _ => manage(db.store(), console),
        };
        report(console, result)?;
    }
}

fn manage<C: Console>(store: &Store, console: &mut C) -> Result<Outcome, CoreError> {
    console.write_line("\nMenu:");
    console.write_line("1. View Data Tables");
    console.write_line("2. Add Data to a Table");
    console.write_line("3. Delete Data from a Table");
    console.write_line("4. Update Data from a Table");
    console.write_line("\n0. go back...");
    let Some(choice) = select_index(console, "> ", 4)? else {
        console.write_line("< returned to menu");
        return Ok(Outcome::Cancelled);
    };
    let action = match choice {
        1 => return flows::browse_tables(store, console),
        2 => Action::Add,
        3 => Action::Delete,
        _ => Action::Update,
    };

    let Some(kind) = choose_table(console)? else {
        console.write_line("< returned to menu");
        return Ok(Outcome::Cancelled);
    };
    match action {
        Action::Add => flows::add_record(store, console, kind),
        Action::Delete => flows::delete_record(store, console, kind),
        Action::Update => flows::update_record(store, console, kind),
    }
}

fn choose_table<C: Console>(console: &mut C) -> Result<Option<TableKind>, CoreError> {
    console.write_line("\nChoose:");
    console.write_line("1. Events");
    console.write_line("2. Guests");
    console.write_line("3. Hosts");
    console.write_line("4. Bands");
    console.write_line("\n0. go back...");
    let choice = select_index(console, "> ", TableKind::ALL.len())?;
    Ok(choice.and_then(TableKind::from_menu_index))
}

/// Prints recoverable failures and keeps the loop alive; console I/O
/// failures end the session.
fn report<C: Console>(console: &mut C, result: Result<Outcome, CoreError>) -> Result<(), CoreError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.is_recoverable() => {
            error!(error = %err, "operation failed");
            console.write_line(&err.report());
            Ok(())
        }
        Err(err) => Err(err),
    }
}
