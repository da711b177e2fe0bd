//! Interactive menus
//!
//! Main menu: select/create user, load, save, exit. User menu: add, remove
//! and book spaces, view and export bookings. End of input leaves the
//! session as if "0" had been chosen (without the save prompt).

use spacebook_core::config::StoreConfig;
use spacebook_core::core_booking::report::write_bookings;
use spacebook_core::{BookingError, SpaceManager, SpaceVisibility, UserId};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

const MAIN_MENU: &str = "\n--- Main Menu ---\n\
1. Select user\n\
2. Create new user\n\
3. Load data\n\
4. Save data\n\
0. Exit\n";

const USER_MENU: &str = "\n--- User Menu ---\n\
1. Add space\n\
2. Remove space\n\
3. Book space\n\
4. View bookings\n\
5. Export bookings\n\
0. Back to main menu\n";

pub struct Session<M, R, W> {
    manager: M,
    input: R,
    output: W,
    defaults: StoreConfig,
}

impl<M: SpaceManager, R: BufRead, W: Write> Session<M, R, W> {
    pub fn new(manager: M, input: R, output: W, defaults: StoreConfig) -> Self {
        Self {
            manager,
            input,
            output,
            defaults,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (M, W) {
        (self.manager, self.output)
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a path, falling back to `default` on an empty answer
    fn prompt_path(&mut self, label: &str, default: PathBuf) -> io::Result<Option<PathBuf>> {
        let answer = self.prompt(&format!("{} [{}]: ", label, default.display()))?;
        Ok(answer.map(|a| if a.is_empty() { default } else { PathBuf::from(a) }))
    }

    fn report_error(&mut self, action: &str, err: &BookingError) -> io::Result<()> {
        warn!(action, error = %err, "operation failed");
        writeln!(self.output, "Error {}: {}", action, err)
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", MAIN_MENU)?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => {
                    if let Some(user) = self.select_user()? {
                        self.user_menu(&user)?;
                    }
                }
                "2" => {
                    if let Some(user) = self.create_user()? {
                        self.user_menu(&user)?;
                    }
                }
                "3" => self.load_data()?,
                "4" => self.save_data()?,
                "0" => {
                    let answer = self.prompt("Save data before exiting? (y/n): ")?;
                    if answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                        self.save_data()?;
                    }
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }

    fn select_user(&mut self) -> io::Result<Option<UserId>> {
        let Some(name) = self.prompt("Username: ")? else {
            return Ok(None);
        };
        match self.manager.find_user(&name) {
            Some(user) => {
                let id = user.id.clone();
                writeln!(self.output, "User '{}' selected.", name)?;
                Ok(Some(id))
            }
            None => {
                writeln!(self.output, "User '{}' not found.", name)?;
                Ok(None)
            }
        }
    }

    /// Keeps asking until a user is created or input ends
    fn create_user(&mut self) -> io::Result<Option<UserId>> {
        loop {
            let Some(name) = self.prompt("Username: ")? else {
                return Ok(None);
            };
            if name.is_empty() {
                writeln!(self.output, "Username cannot be empty. Try again.")?;
                continue;
            }
            match self.manager.create_user(&name) {
                Ok(user) => {
                    writeln!(self.output, "User '{}' created and selected.", name)?;
                    return Ok(Some(user.id));
                }
                Err(e) => self.report_error("creating user", &e)?,
            }
        }
    }

    fn load_data(&mut self) -> io::Result<()> {
        let default = self.defaults.backup_file.clone();
        let Some(path) = self.prompt_path("Backup file to load", default)? else {
            return Ok(());
        };
        match self.manager.load_data(&path) {
            Ok(summary) => writeln!(
                self.output,
                "Data loaded from {} ({} users, {} spaces, {} bookings).",
                path.display(),
                summary.users,
                summary.spaces,
                summary.bookings
            ),
            Err(e) => self.report_error("loading data", &e),
        }
    }

    fn save_data(&mut self) -> io::Result<()> {
        let default = self.defaults.backup_file.clone();
        let Some(path) = self.prompt_path("Backup file", default)? else {
            return Ok(());
        };
        match self.manager.save_data(&path) {
            Ok(_) => writeln!(self.output, "Data saved to {}.", path.display()),
            Err(e) => self.report_error("saving data", &e),
        }
    }

    fn user_menu(&mut self, user: &UserId) -> io::Result<()> {
        loop {
            write!(self.output, "{}", USER_MENU)?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.add_space(user)?,
                "2" => self.remove_space(user)?,
                "3" => self.book_space(user)?,
                "4" => self.view_bookings(user)?,
                "5" => self.export_bookings(user)?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }

    fn add_space(&mut self, user: &UserId) -> io::Result<()> {
        let Some(name) = self.prompt("Space name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            return writeln!(self.output, "Space name cannot be empty.");
        }
        let private = self
            .prompt("Private space? (y/n): ")?
            .is_some_and(|a| a.eq_ignore_ascii_case("y"));

        match self
            .manager
            .add_space(user, &name, SpaceVisibility::from_private_flag(private))
        {
            Ok(_) => writeln!(self.output, "Space '{}' added.", name),
            Err(e) => self.report_error("adding space", &e),
        }
    }

    fn remove_space(&mut self, user: &UserId) -> io::Result<()> {
        let Some(name) = self.prompt("Space to remove: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            return writeln!(self.output, "Space name cannot be empty.");
        }
        match self.manager.remove_space(user, &name) {
            Ok(()) => writeln!(self.output, "Space '{}' removed.", name),
            Err(e) => self.report_error("removing space", &e),
        }
    }

    fn book_space(&mut self, user: &UserId) -> io::Result<()> {
        let Some(name) = self.prompt("Space to book: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Booking date (DD-MM-YYYY): ")? else {
            return Ok(());
        };
        if name.is_empty() || date.is_empty() {
            return writeln!(self.output, "Space name and date cannot be empty.");
        }
        match self.manager.book_space(user, &name, &date) {
            Ok(booking) => writeln!(
                self.output,
                "Space '{}' booked for {}.",
                name, booking.date
            ),
            Err(e) => self.report_error("booking space", &e),
        }
    }

    fn view_bookings(&mut self, user: &UserId) -> io::Result<()> {
        match self.manager.view_user_bookings(user) {
            Ok(entries) => write_bookings(&mut self.output, user.as_str(), &entries),
            Err(e) => self.report_error("viewing bookings", &e),
        }
    }

    fn export_bookings(&mut self, user: &UserId) -> io::Result<()> {
        let default = self.defaults.export_file.clone();
        let Some(path) = self.prompt_path("Export file", default)? else {
            return Ok(());
        };
        match self.manager.export_user_bookings(user, &path) {
            Ok(()) => writeln!(self.output, "Bookings exported to {}.", path.display()),
            Err(e) => self.report_error("exporting bookings", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacebook_core::SpaceManagerImpl;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_script(script: &str, defaults: StoreConfig) -> (SpaceManagerImpl, String) {
        let mut session = Session::new(
            SpaceManagerImpl::new(),
            Cursor::new(script.to_string()),
            Vec::new(),
            defaults,
        );
        session.run().unwrap();
        let (manager, out) = session.into_parts();
        (manager, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_create_user_add_space_and_book() {
        let script = "2\nalice\n1\nRoom1\nn\n3\nRoom1\n01-01-2099\n3\nRoom1\n01-01-2099\n4\n0\n0\nn\n";
        let (manager, out) = run_script(script, StoreConfig::default());

        assert!(out.contains("User 'alice' created and selected."));
        assert!(out.contains("Space 'Room1' added."));
        assert!(out.contains("Space 'Room1' booked for 01-01-2099."));
        assert!(out.contains("Error booking space: Space 'Room1' is already booked on 01-01-2099"));
        assert!(out.contains("Prenotazioni per l'utente 'alice':\nSpazio: Room1, Data: 01-01-2099\n"));
        assert!(out.ends_with("Goodbye.\n"));
        assert_eq!(manager.find_space("Room1").unwrap().bookings.len(), 1);
    }

    #[test]
    fn test_create_user_retries_on_blank_and_duplicate() {
        let script = "2\nbob\n0\n2\n\nbob\ncarol\n0\n0\nn\n";
        let (manager, out) = run_script(script, StoreConfig::default());

        assert!(out.contains("Username cannot be empty. Try again."));
        assert!(out.contains("Error creating user: User 'bob' already exists"));
        assert!(manager.find_user("carol").is_some());
    }

    #[test]
    fn test_select_unknown_user() {
        let (_, out) = run_script("1\nghost\n0\nn\n", StoreConfig::default());
        assert!(out.contains("User 'ghost' not found."));
        assert!(!out.contains("--- User Menu ---"));
    }

    #[test]
    fn test_private_space_rejected_for_other_user() {
        let script = "2\nalice\n1\nStudio\ny\n0\n2\nbob\n3\nStudio\n01-01-2099\n0\n0\nn\n";
        let (_, out) = run_script(script, StoreConfig::default());
        assert!(out.contains("Error booking space: Space 'Studio' is private"));
    }

    #[test]
    fn test_save_on_exit_and_load_with_defaults() {
        let dir = tempdir().unwrap();
        let defaults = StoreConfig {
            backup_file: dir.path().join("backup.json"),
            export_file: dir.path().join("out.txt"),
        };

        // Empty answers take the configured defaults.
        let (_, out) = run_script("2\nalice\n1\nRoom1\nn\n5\n\n0\n0\ny\n\n", defaults.clone());
        assert!(out.contains("Data saved to"));
        assert!(defaults.backup_file.exists());
        assert_eq!(
            std::fs::read_to_string(&defaults.export_file).unwrap(),
            "Prenotazioni per l'utente 'alice':\n"
        );

        let (manager, out) = run_script("3\n\n1\nalice\n2\nRoom1\n0\n0\nn\n", defaults);
        assert!(out.contains("Data loaded from"));
        assert!(out.contains("Space 'Room1' removed."));
        assert!(manager.find_space("Room1").is_none());
    }

    #[test]
    fn test_end_of_input_exits_quietly() {
        let (_, out) = run_script("2\nalice\n", StoreConfig::default());
        assert!(!out.contains("Goodbye."));
    }

    #[test]
    fn test_invalid_options() {
        let (_, out) = run_script("9\n2\nalice\nx\n0\n0\nn\n", StoreConfig::default());
        assert_eq!(out.matches("Invalid option. Try again.").count(), 2);
    }
}
