//! harmonograph - TUI and CLI for the harmonograph simulator
//!
//! Usage:
//!   harmonograph                     Launch interactive TUI
//!   harmonograph trace [options]     Headless trace to SVG/JSON/PNG
//!   harmonograph benchmark           Benchmark sampler throughput
//!   harmonograph presets [action]    Manage the preset book

use std::env;
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use ratatui_image::{
    picker::{Picker, ProtocolType},
    protocol::StatefulProtocol,
    StatefulImage,
};

use harmonograph::{Axis, Param, Point, Simulator, TabId};

mod cli;

use cli::{cmd_benchmark, cmd_presets, cmd_trace, svg_to_image, trace_to_svg, VIEW_HEIGHT, VIEW_WIDTH};

// Rendered image dimensions - 2x the virtual view for crisp sixel output
const IMAGE_WIDTH: u32 = VIEW_WIDTH * 2;
const IMAGE_HEIGHT: u32 = VIEW_HEIGHT * 2;

/// Simulation frames folded into each draw tick. The simulation clock
/// runs at its own fps; the terminal only needs the aggregate points.
const TICKS_PER_DRAW: u32 = 20;

/// Retained trace points before the oldest strokes are dropped.
const MAX_TRACE_POINTS: usize = 150_000;

/// Max chord length between rendered points, in view pixels.
const MAX_DIST: f64 = 1.0;

/// Application state for TUI
struct App {
    sim: Simulator,
    /// Accumulated curve, split into strokes at signal rebuilds
    strokes: Vec<Vec<Point>>,
    /// Total points across all strokes (kept in sync for trimming)
    trace_points: usize,
    /// Index of the selected tab among live tabs
    selected_tab: usize,
    /// Which slider is focused (0-3 = x params, 4-7 = y params)
    slider_focus: usize,
    /// Wipe the canvas whenever the signal is rebuilt
    auto_clear: bool,
    /// Frames that hit the subdivision depth cap
    capped_frames: u64,
    should_quit: bool,
    /// Image picker for terminal protocol detection
    picker: Picker,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    needs_image_update: bool,
}

impl App {
    fn new() -> Self {
        // Initialize image picker - force Sixel protocol
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;

        App {
            sim: Simulator::new(),
            strokes: vec![Vec::new()],
            trace_points: 0,
            selected_tab: 0,
            slider_focus: 0,
            auto_clear: true,
            capped_frames: 0,
            should_quit: false,
            picker,
            image_state: None,
            needs_image_update: true,
        }
    }

    fn selected_tab_id(&self) -> TabId {
        self.sim
            .tabs()
            .iter()
            .nth(self.selected_tab)
            .map(|t| t.id)
            .unwrap_or_else(|| self.sim.tabs().iter().next().unwrap().id)
    }

    /// Advance the simulation by one draw tick's worth of frames and
    /// fold the sampled points into the trace.
    fn advance(&mut self) {
        let mut changed = false;
        for _ in 0..TICKS_PER_DRAW {
            let frame = self.sim.advance_frame(MAX_DIST);
            if frame.capped {
                self.capped_frames += 1;
            }
            if frame.rebuilt {
                if self.auto_clear {
                    self.clear_trace();
                } else {
                    // A parameter jump: break the polyline, never draw
                    // across the discontinuity.
                    self.strokes.push(Vec::new());
                }
            }
            if frame.points.is_empty() {
                continue;
            }
            let stroke = self.strokes.last_mut().unwrap();
            // The first point repeats the previous frame's stitch point.
            let skip = if stroke.is_empty() { 0 } else { 1 };
            let added = frame.points.len() - skip;
            stroke.extend(frame.points.into_iter().skip(skip));
            self.trace_points += added;
            changed = true;
        }

        while self.trace_points > MAX_TRACE_POINTS && self.strokes.len() > 1 {
            self.trace_points -= self.strokes.remove(0).len();
        }
        if self.trace_points > MAX_TRACE_POINTS {
            let stroke = &mut self.strokes[0];
            let excess = self.trace_points - MAX_TRACE_POINTS;
            stroke.drain(..excess.min(stroke.len()));
            self.trace_points = stroke.len();
        }

        if changed {
            self.needs_image_update = true;
        }
    }

    fn update_image(&mut self) {
        if self.needs_image_update {
            let svg = trace_to_svg(&self.strokes, IMAGE_WIDTH, IMAGE_HEIGHT);
            let img = svg_to_image(&svg, IMAGE_WIDTH, IMAGE_HEIGHT);
            self.image_state = Some(self.picker.new_resize_protocol(img));
            self.needs_image_update = false;
        }
    }

    fn clear_trace(&mut self) {
        self.strokes.clear();
        self.strokes.push(Vec::new());
        self.trace_points = 0;
        self.needs_image_update = true;
    }

    fn focused_slider(&self) -> (Axis, Param) {
        let axis = if self.slider_focus < 4 { Axis::X } else { Axis::Y };
        (axis, Param::all()[self.slider_focus % 4])
    }

    fn adjust_slider(&mut self, direction: f64, coarse: bool) {
        let (axis, param) = self.focused_slider();
        let range = param.range();
        let step = range.span() / if coarse { 25.0 } else { 200.0 };
        let id = self.selected_tab_id();
        let current = match axis {
            Axis::X => self.sim.tabs().get(id).map(|t| t.x.get(param)),
            Axis::Y => self.sim.tabs().get(id).map(|t| t.y.get(param)),
        };
        if let Some(current) = current {
            self.sim.set_param(id, axis, param, current + direction * step);
        }
    }

    fn next_tab(&mut self) {
        let count = self.sim.tabs().len();
        self.selected_tab = (self.selected_tab + 1) % count;
    }

    fn prev_tab(&mut self) {
        let count = self.sim.tabs().len();
        self.selected_tab = if self.selected_tab == 0 { count - 1 } else { self.selected_tab - 1 };
    }

    fn add_tab(&mut self) {
        self.sim.add_tab();
        self.selected_tab = self.sim.tabs().len() - 1;
    }

    fn remove_tab(&mut self) {
        if self.sim.remove_tab(self.selected_tab_id()) {
            self.selected_tab = self.selected_tab.min(self.sim.tabs().len().saturating_sub(1));
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Check for CLI subcommands
    if args.len() >= 2 {
        match args[1].as_str() {
            "trace" => {
                cmd_trace(&args[2..]);
                return;
            }
            "benchmark" => {
                cmd_benchmark(&args[2..]);
                return;
            }
            "presets" => {
                cmd_presets(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            other => {
                eprintln!("Unknown command: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    // Launch TUI
    if let Err(e) = run_tui() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui() -> Result<(), String> {
    // Initialize terminal
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(EnterAlternateScreen).map_err(|e| e.to_string())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout())).map_err(|e| e.to_string())?;

    let mut app = App::new();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(LeaveAlternateScreen).map_err(|e| e.to_string())?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), String> {
    loop {
        app.advance();
        app.update_image();

        terminal.draw(|frame| ui(frame, app)).map_err(|_| "Draw error".to_string())?;

        if event::poll(Duration::from_millis(30)).map_err(|e| e.to_string())? {
            if let Event::Key(key) = event::read().map_err(|e| e.to_string())? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char(' ') => {
                            app.sim.toggle_pause();
                        }
                        KeyCode::Char('f') => {
                            app.sim.cycle_speed();
                        }
                        KeyCode::Char('r') => {
                            app.sim.reset();
                            app.clear_trace();
                        }
                        KeyCode::Char('c') => {
                            app.clear_trace();
                        }
                        KeyCode::Char('t') => {
                            app.auto_clear = !app.auto_clear;
                        }
                        // Tab management
                        KeyCode::Char('a') => {
                            app.add_tab();
                        }
                        KeyCode::Char('x') => {
                            let id = app.selected_tab_id();
                            app.sim.toggle_tab(id);
                        }
                        KeyCode::Backspace => {
                            app.remove_tab();
                        }
                        KeyCode::Char('[') => {
                            app.prev_tab();
                        }
                        KeyCode::Char(']') => {
                            app.next_tab();
                        }
                        // Slider focus and adjustment
                        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                            app.slider_focus = (app.slider_focus + 1) % 8;
                        }
                        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                            app.slider_focus = (app.slider_focus + 7) % 8;
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.adjust_slider(-1.0, false);
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.adjust_slider(1.0, false);
                        }
                        KeyCode::Char(',') => {
                            app.adjust_slider(-1.0, true);
                        }
                        KeyCode::Char('.') => {
                            app.adjust_slider(1.0, true);
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(frame.area());

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(40)])
        .split(main_layout[0]);

    // Split left sidebar into tab list and stats
    let sidebar_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(9)])
        .split(top_layout[0]);

    // Tab list
    let items: Vec<ListItem> = app
        .sim
        .tabs()
        .iter()
        .map(|t| {
            let marker = if t.active { "●" } else { "○" };
            ListItem::new(format!("{} {}", marker, t.name))
        })
        .collect();

    let mut tab_state = ListState::default();
    tab_state.select(Some(app.selected_tab));

    let list = List::new(items)
        .block(Block::default()
            .title(" Tabs ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)))
        .highlight_style(Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, sidebar_layout[0], &mut tab_state);

    // Stats panel
    let clock = app.sim.clock();
    let stats_text = format!(
        "Time: {:.2}s\nSpeed: x{}\n{}\nTabs: {}/{}\nPoints: {}\nCapped: {}",
        clock.time(),
        clock.speed(),
        if clock.paused() { "PAUSED" } else { "running" },
        app.sim.tabs().active_count(),
        app.sim.tabs().len(),
        app.trace_points,
        app.capped_frames,
    );
    let stats = Paragraph::new(stats_text)
        .block(Block::default()
            .title(" Stats ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White));

    frame.render_widget(stats, sidebar_layout[1]);

    // Curve view
    let title = if clock.paused() {
        " harmonograph [paused] ".to_string()
    } else {
        format!(" harmonograph [x{}] ", clock.speed())
    };
    let border_color = if clock.paused() { Color::Yellow } else { Color::Green };

    let image_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = image_block.inner(top_layout[1]);
    frame.render_widget(image_block, top_layout[1]);

    if let Some(ref mut image_state) = app.image_state {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }

    // Sliders panel
    let bottom_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_layout[1]);

    let sliders = Paragraph::new(slider_lines(app))
        .block(Block::default()
            .title(format!(" Sliders - {} ", app.sim.tabs().get(app.selected_tab_id())
                .map(|t| t.name.clone())
                .unwrap_or_default()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(sliders, bottom_layout[0]);

    // Help
    let help = Paragraph::new(
        "space pause  f speed  r reset  c clear\n\
         a add tab  x toggle  [ ] switch  bksp del\n\
         tab/↑↓ slider  ←→ adjust  , . coarse\n\
         t auto-clear  q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, bottom_layout[1]);
}

/// Two rows of four sliders, the focused one highlighted.
fn slider_lines(app: &App) -> Vec<Line<'static>> {
    let Some(tab) = app.sim.tabs().get(app.selected_tab_id()) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (row, (axis_name, pend)) in [("x", &tab.x), ("y", &tab.y)].iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{}: ", axis_name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        for (col, &param) in Param::all().iter().enumerate() {
            let focused = app.slider_focus == row * 4 + col;
            let style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if focused { "►" } else { " " };
            spans.push(Span::styled(
                format!("{}{}={:.3}  ", marker, param.name(), pend.get(param)),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn print_usage(prog: &str) {
    eprintln!("harmonograph - interactive damped-pendulum curve simulator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} ", prog);
    eprintln!("  {} trace [options]", prog);
    eprintln!("  {} benchmark [options]", prog);
    eprintln!("  {} presets [action] [options]", prog);
    eprintln!();
    eprintln!("With no command, launches the interactive TUI.");
    eprintln!();
    eprintln!("TUI Controls:");
    eprintln!("  space         Pause/resume");
    eprintln!("  f             Cycle speed (x1..x128, wraps)");
    eprintln!("  r             Reset time to zero");
    eprintln!("  c             Clear the canvas");
    eprintln!("  t             Toggle auto-clear on parameter change");
    eprintln!("  a / Backspace Add / remove tab");
    eprintln!("  x             Toggle selected tab's contribution");
    eprintln!("  [ / ]         Switch selected tab");
    eprintln!("  Tab, ↑/↓      Move slider focus");
    eprintln!("  ←/→ and , .   Adjust focused slider (fine / coarse)");
    eprintln!("  q / Esc       Quit");
    eprintln!();
    eprintln!("See '{} <command> --help' for command options.", prog);
}
