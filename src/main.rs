//! Terminal front end: animates a sort as colored columns.
//!
//! ```text
//! sortviz [ALGORITHM] [PRESET]
//! ```
//!
//! `PRESET` is a path to a TOML file, or the name of one in `presets/`.
//!
//! Keys: space/enter sort, `g` new array, `1`-`5` pick algorithm, `+`/`-`
//! speed, `q`/Esc/Ctrl+C quit. Quitting mid-run abandons the run. Other
//! requests made during a run are refused until it ends.

use std::future::Future;
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::pin::pin;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use rand::Rng;
use sortviz::animation::{Renderer, ThreadTimer};
use sortviz::bars::{SlotColor, VisualSlots};
use sortviz::options::{ColorOptions, Options, RunOptions, MAX_LEN};
use sortviz::{Admission, Algorithm, RunOutcome, SortError, Visualizer};

/// Rows reserved above the bars for the status line.
const STATUS_ROWS: u16 = 1;

/// Directory searched for presets given by name.
const PRESET_DIR: &str = "presets";

/// How long to wait for input between polls of a running sort.
const INPUT_POLL: Duration = Duration::from_millis(1);

type TerminalVisualizer = Visualizer<TerminalRenderer, ThreadTimer>;

/// What the key loop does after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Sort,
    Quit,
}

/// Draws each bar as one terminal column.
struct TerminalRenderer {
    out: Stdout,
    colors: ColorOptions,
    heights: Vec<u32>,
    max_height: u32,
    rows: u16,
    error: Option<io::Error>,
}

impl TerminalRenderer {
    fn new(colors: ColorOptions, max_height: u32, rows: u16) -> Self {
        Self {
            out: io::stdout(),
            colors,
            heights: Vec::new(),
            max_height: max_height.max(1),
            rows,
            error: None,
        }
    }

    /// Filled cells for a bar of `height`; never zero for a visible bar.
    fn cells(&self, height: u32) -> u16 {
        let scaled = u64::from(height) * u64::from(self.rows)
            / u64::from(self.max_height);
        (scaled as u16).clamp(1, self.rows)
    }

    fn draw(&mut self, index: usize, color: SlotColor) -> io::Result<()> {
        let (Ok(x), Some(&height)) =
            (u16::try_from(index), self.heights.get(index))
        else {
            return Ok(());
        };
        let filled = self.cells(height);
        let [r, g, b] = self.colors.rgb8(color);
        queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))?;
        for row in 0..self.rows {
            let y = STATUS_ROWS + self.rows - 1 - row;
            let glyph = if row < filled { '█' } else { ' ' };
            queue!(self.out, MoveTo(x, y), Print(glyph))?;
        }
        queue!(self.out, ResetColor)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

impl Renderer for TerminalRenderer {
    fn apply_visual(
        &mut self,
        index: usize,
        height: Option<u32>,
        color: SlotColor,
    ) {
        if let (Some(h), Some(slot)) = (height, self.heights.get_mut(index)) {
            *slot = h;
        }
        let result = self.draw(index, color);
        self.record(result);
    }

    fn present(&mut self) {
        let result = self.out.flush();
        self.record(result);
    }

    fn rebuild(&mut self, slots: &VisualSlots) {
        self.heights = slots.iter().map(|s| s.height).collect();
        let result = queue!(self.out, Clear(ClearType::All));
        self.record(result);
        for (index, slot) in slots.iter().enumerate() {
            let result = self.draw(index, slot.color);
            self.record(result);
        }
        self.present();
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SortError> {
    let options = parse_args(std::env::args().skip(1))?;
    let (cols, rows) = terminal::size()?;

    let mut run_options = options.run;
    run_options.array_len =
        run_options.array_len.min(usize::from(cols)).min(MAX_LEN);
    let renderer = TerminalRenderer::new(
        options.colors,
        run_options.max_height,
        rows.saturating_sub(STATUS_ROWS).max(1),
    );

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    let result = event_loop(run_options, renderer, &mut rand::rng());
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Positional arguments: an algorithm id, a preset, or both.
fn parse_args(
    args: impl Iterator<Item = String>,
) -> Result<Options, SortError> {
    let mut options = Options::default();
    let mut algorithm = None;
    for arg in args {
        if Path::new(&arg)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
        {
            options = Options::load(Path::new(&arg))?;
            log::info!("loaded preset {arg}");
        } else if let Ok(parsed) = arg.parse::<Algorithm>() {
            algorithm = Some(parsed);
        } else {
            options = match Options::load_preset(Path::new(PRESET_DIR), &arg) {
                Err(e @ SortError::UnknownPreset { .. }) => {
                    let ids: Vec<&str> =
                        Algorithm::ALL.iter().map(|a| a.id()).collect();
                    log::error!("algorithms: {}", ids.join(", "));
                    return Err(e);
                }
                loaded => loaded?,
            };
            log::info!("loaded preset {arg} from {PRESET_DIR}/");
        }
    }
    if let Some(algorithm) = algorithm {
        options.run.algorithm = algorithm;
    }
    Ok(options)
}

fn event_loop<G: Rng + ?Sized>(
    options: RunOptions,
    renderer: TerminalRenderer,
    rng: &mut G,
) -> Result<(), SortError> {
    let vis = Visualizer::new(options, renderer, ThreadTimer::new(), rng)?;
    status(&vis, "ready")?;

    loop {
        let Some(key) = read_key(None)? else {
            continue;
        };
        let flow = match handle_key(&vis, key, rng)? {
            Flow::Sort => sort_interactively(&vis, rng)?,
            flow => flow,
        };
        if flow == Flow::Quit {
            return Ok(());
        }

        if let Some(e) = vis.renderer_mut().and_then(|mut r| r.error.take()) {
            return Err(e.into());
        }
    }
}

/// Poll a run by hand, reading keys in between so quitting and refused
/// requests are answered while the bars move.
///
/// Returning [`Flow::Quit`] drops the run future, which hands the partially
/// sorted bars back to the visualizer.
fn sort_interactively<G: Rng + ?Sized>(
    vis: &TerminalVisualizer,
    rng: &mut G,
) -> Result<Flow, SortError> {
    status(vis, "sorting")?;
    let mut cx = Context::from_waker(Waker::noop());
    let mut run = pin!(vis.start_sort());

    loop {
        if let Poll::Ready(outcome) = run.as_mut().poll(&mut cx) {
            if let RunOutcome::Completed(report) = outcome? {
                let msg = format!(
                    "done: {} steps, {} compares",
                    report.stats.steps, report.stats.compares
                );
                status(vis, &msg)?;
            }
            return Ok(Flow::Continue);
        }
        let Some(key) = read_key(Some(INPUT_POLL))? else {
            continue;
        };
        match handle_key(vis, key, rng)? {
            Flow::Quit => return Ok(Flow::Quit),
            Flow::Sort => {
                let outcome = pollster::block_on(vis.start_sort())?;
                if outcome == RunOutcome::Ignored {
                    status(vis, "ignored: run in progress")?;
                }
            }
            Flow::Continue => {}
        }
    }
}

/// Next key press. With a timeout, `None` means nothing arrived in time.
fn read_key(timeout: Option<Duration>) -> io::Result<Option<KeyEvent>> {
    if let Some(timeout) = timeout {
        if !event::poll(timeout)? {
            return Ok(None);
        }
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn handle_key<G: Rng + ?Sized>(
    vis: &TerminalVisualizer,
    key: KeyEvent,
    rng: &mut G,
) -> Result<Flow, SortError> {
    if is_quit(key) {
        return Ok(Flow::Quit);
    }
    let admission = match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => return Ok(Flow::Sort),
        KeyCode::Char('g') => vis.regenerate(rng)?,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let picked = c
                .to_digit(10)
                .and_then(|d| d.checked_sub(1))
                .and_then(|i| Algorithm::ALL.get(i as usize));
            let Some(&algorithm) = picked else {
                return Ok(Flow::Continue);
            };
            vis.select_algorithm(algorithm)
        }
        KeyCode::Char('+') => {
            vis.set_speed((vis.options().speed * 2.0).min(1000.0))?;
            Admission::Accepted
        }
        KeyCode::Char('-') => {
            vis.set_speed((vis.options().speed / 2.0).max(0.25))?;
            Admission::Accepted
        }
        _ => return Ok(Flow::Continue),
    };

    let msg = match admission {
        Admission::Ignored => "ignored: run in progress",
        Admission::Accepted if vis.is_running() => "sorting",
        Admission::Accepted => "ready",
    };
    status(vis, msg)?;
    Ok(Flow::Continue)
}

/// `q`, Esc, or Ctrl+C (raw mode delivers it as a key, not a signal).
fn is_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn status(vis: &TerminalVisualizer, msg: &str) -> io::Result<()> {
    let options = vis.options();
    let line = format!(
        "{} | speed {} | {} bars | {msg} | space sort, g new, 1-5 algo, \
         +/- speed, q quit",
        options.algorithm, options.speed, options.array_len
    );
    let mut out = io::stdout();
    queue!(
        out,
        MoveTo(0, 0),
        Clear(ClearType::CurrentLine),
        Print(line)
    )?;
    out.flush()
}
