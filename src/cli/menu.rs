//! Interactive menu - numbered choices read from a console
//!
//! Each prompt gives the user `MAX_CHANCES` attempts. The main loop keeps a
//! separate error budget for the whole session; running out ends it.

use super::connections;
use super::danger;
use super::graph::{write_target, Target};
use super::Settings;
use anyhow::{anyhow, bail, Result};
use console::Term;
use std::io::{BufRead, Write};
use tps::graph::ImageFormat;
use tps::reference::HospitalView;
use tps::reporters::{DangerColumn, DangerSort, OutputFormat, RoomSort};

/// Attempts per prompt, and errors per session
pub const MAX_CHANCES: usize = 3;

const EXIT: u32 = 999;
const NO_HOSPITAL: &str = "CHOOSE A HOSPITAL";

/// A titled list of numbered options
#[derive(Debug, Clone)]
pub struct Menu {
    title: String,
    options: Vec<(u32, String)>,
}

impl Menu {
    pub fn new(title: impl Into<String>, options: Vec<(u32, String)>) -> Self {
        Self {
            title: title.into(),
            options,
        }
    }

    /// Options numbered from 1 in the given order
    pub fn numbered<I, S>(title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = items
            .into_iter()
            .zip(1..)
            .map(|(item, n)| (n, item.into()))
            .collect();
        Self::new(title, options)
    }

    pub fn label(&self, choice: u32) -> Option<&str> {
        self.options
            .iter()
            .find(|(n, _)| *n == choice)
            .map(|(_, label)| label.as_str())
    }

    fn main() -> Self {
        let options = [
            (1, "Choose a hospital"),
            (2, "Graph hospital"),
            (3, "Graph illness"),
            (4, "Graph room"),
            (5, "Print room connections"),
            (6, "Print illness danger"),
            (EXIT, "EXIT"),
        ];
        Self::new(
            "TWO POINT SCIENCE",
            options
                .iter()
                .map(|(n, label)| (*n, label.to_string()))
                .collect(),
        )
    }
}

/// What the main loop does after an action
enum Step {
    /// Clear the screen before the next menu
    Done,
    /// Leave output on screen for the user to read
    Shown,
    /// Input ended
    Closed,
}

pub struct Session<'s, R, W> {
    settings: &'s Settings,
    input: R,
    output: W,
    clear_screen: bool,
    render: Option<ImageFormat>,
    hospital: Option<String>,
}

impl<'s, R: BufRead, W: Write> Session<'s, R, W> {
    pub fn new(
        settings: &'s Settings,
        input: R,
        output: W,
        clear_screen: bool,
        render: Option<ImageFormat>,
    ) -> Self {
        Self {
            settings,
            input,
            output,
            clear_screen,
            render,
            hospital: None,
        }
    }

    /// Main loop; returns when the user exits or input ends
    pub fn run_loop(&mut self) -> Result<()> {
        let menu = Menu::main();
        let mut chances = MAX_CHANCES;
        let mut clear = self.clear_screen;

        loop {
            if clear {
                let _ = Term::stdout().clear_screen();
            }
            self.show(&menu)?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            clear = self.clear_screen;

            let step = match line.trim().parse::<u32>() {
                Ok(1) => self.choose_hospital(),
                Ok(2) => self.graph(|_| Ok(Some(Target::Hospital))),
                Ok(3) => self.graph(|session| session.choose_illness()),
                Ok(4) => self.graph(|session| session.choose_room()),
                Ok(5) => self.connections(),
                Ok(6) => self.danger(),
                Ok(EXIT) => return Ok(()),
                _ => Err(anyhow!("INVALID SELECTION")),
            };

            match step {
                Ok(Step::Done) => {}
                Ok(Step::Shown) => clear = false,
                Ok(Step::Closed) => return Ok(()),
                Err(e) => {
                    chances -= 1;
                    if chances == 0 {
                        writeln!(self.output, "\n*** ERROR: TOO MANY INVALID SELECTIONS ***\n")?;
                        bail!("TOO MANY INVALID SELECTIONS");
                    }
                    tracing::debug!(remaining = chances, "Menu error: {:#}", e);
                    writeln!(self.output, "\n*** ERROR: {:#} ***\n", e)?;
                    clear = false;
                }
            }
        }
    }

    fn show(&mut self, menu: &Menu) -> Result<()> {
        writeln!(self.output, "\n{}", menu.title)?;
        for (n, label) in &menu.options {
            writeln!(self.output, "{}: {}", n, label)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        writeln!(self.output, "Enter a selection:")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show `menu` and read a valid choice, giving up after
    /// `MAX_CHANCES` invalid entries. `None` when input ends.
    pub fn get_choice(&mut self, menu: &Menu) -> Result<Option<u32>> {
        self.show(menu)?;
        let mut attempts = 0;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            attempts += 1;
            match line.parse::<u32>() {
                Ok(choice) if menu.label(choice).is_some() => return Ok(Some(choice)),
                _ if attempts >= MAX_CHANCES => {
                    bail!("User failures exceeded maximum chances")
                }
                _ => writeln!(self.output, "{} is an invalid selection.  Try again.", line)?,
            }
        }
    }

    /// Like `get_choice`, returning the chosen label
    fn choose_label(&mut self, menu: &Menu) -> Result<Option<String>> {
        Ok(self
            .get_choice(menu)?
            .and_then(|choice| menu.label(choice))
            .map(str::to_string))
    }

    fn current_hospital(&self) -> Result<HospitalView<'s>> {
        let settings = self.settings;
        match &self.hospital {
            Some(name) => Ok(settings.data.hospital(name)?),
            None => Err(anyhow!(NO_HOSPITAL)),
        }
    }

    fn choose_hospital(&mut self) -> Result<Step> {
        let names = self
            .settings
            .data
            .hospitals()
            .iter()
            .map(|h| h.name.clone());
        let menu = Menu::numbered("TWO POINT HOSPITAL LIST", names);
        match self.choose_label(&menu)? {
            Some(name) => {
                writeln!(self.output, "Chose {}", name)?;
                self.hospital = Some(name);
                Ok(Step::Done)
            }
            None => Ok(Step::Closed),
        }
    }

    fn choose_illness(&mut self) -> Result<Option<Target>> {
        let hospital = self.current_hospital()?;
        let menu = Menu::numbered("ILLNESS LIST", hospital.illness_names().iter().cloned());
        if menu.options.is_empty() {
            bail!("{} is not configured with illnesses", hospital.name());
        }
        Ok(self.choose_label(&menu)?.map(Target::Illness))
    }

    fn choose_room(&mut self) -> Result<Option<Target>> {
        let hospital = self.current_hospital()?;
        let rooms = hospital.rooms(true)?;
        if rooms.is_empty() {
            bail!("{} is not configured with illnesses", hospital.name());
        }
        let menu = Menu::numbered("ROOM LIST", rooms);
        Ok(self.choose_label(&menu)?.map(Target::Room))
    }

    fn graph<F>(&mut self, pick: F) -> Result<Step>
    where
        F: FnOnce(&mut Self) -> Result<Option<Target>>,
    {
        let hospital = self.current_hospital()?;
        let Some(target) = pick(self)? else {
            return Ok(Step::Closed);
        };
        writeln!(
            self.output,
            "Creating a directed graph of {}...",
            hospital.name()
        )?;
        let output = write_target(
            self.settings,
            &hospital,
            &target,
            self.settings.engine,
            self.render,
        )?;
        writeln!(self.output, "Wrote {}", output.source.display())?;
        if let Some(image) = &output.image {
            writeln!(self.output, "Rendered {}", image.display())?;
        }
        Ok(Step::Shown)
    }

    fn connections(&mut self) -> Result<Step> {
        let hospital = self.current_hospital()?;
        let table = connections::render(
            self.settings,
            hospital.name(),
            None,
            RoomSort::default(),
            OutputFormat::Text,
        )?;
        write!(self.output, "{}", table)?;
        Ok(Step::Shown)
    }

    fn danger(&mut self) -> Result<Step> {
        let hospital = self.current_hospital()?;
        let headers = (1..=6)
            .map(DangerColumn::from_index)
            .collect::<Result<Vec<_>, _>>()?;
        let menu = Menu::numbered("SORT BY", headers.iter().map(|c| c.header()));
        let Some(choice) = self.get_choice(&menu)? else {
            return Ok(Step::Closed);
        };
        let sort = DangerSort {
            column: DangerColumn::from_index(choice as usize)?,
            descending: true,
        };
        let table = danger::render(
            self.settings,
            hospital.name(),
            sort,
            self.settings.strategy,
            OutputFormat::Text,
        )?;
        write!(self.output, "{}", table)?;
        Ok(Step::Shown)
    }
}

pub fn run(settings: &Settings) -> Result<()> {
    let term = Term::stdout();
    let stdin = std::io::stdin();
    let mut session = Session::new(
        settings,
        stdin.lock(),
        std::io::stdout(),
        term.is_term(),
        Some(settings.image_format),
    );
    session.run_loop()
}
