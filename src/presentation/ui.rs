use crate::application::{App, AppMode};
use crate::domain::CALCULATORS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

const LABEL_WIDTH: u16 = 24;
const UNIT_WIDTH: u16 = 9;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1]);

    render_calculator_list(f, app, body[0]);
    render_calculator(f, app, body[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let calculator = app.current_calculator();
    let header = Paragraph::new(format!(
        "quickcalc - Engineering Quick Calculators | {} | Field: {}",
        calculator.title,
        app.current_field().id
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_calculator_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = CALCULATORS
        .iter()
        .map(|calculator| ListItem::new(calculator.title))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Calculators"))
        .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black));

    let mut state = ListState::default();
    state.select(Some(app.selected_calc));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_calculator(f: &mut Frame, app: &App, area: Rect) {
    let calculator = app.current_calculator();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(calculator.inputs.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let editing = matches!(app.mode, AppMode::Editing);
    let input_rows: Vec<Row> = calculator
        .inputs
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let selected = index == app.selected_field;
            let text = if selected && editing {
                app.input.clone()
            } else {
                app.page.get_field(field.id).to_string()
            };
            let style = match (selected, editing) {
                (true, true) => Style::default().bg(Color::Green).fg(Color::Black),
                (true, false) => Style::default().bg(Color::Blue).fg(Color::White),
                _ => Style::default(),
            };
            Row::new(vec![
                Cell::from(field.label).style(Style::default().fg(Color::Yellow)),
                Cell::from(text).style(style),
                Cell::from(field.unit),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(LABEL_WIDTH),
        Constraint::Min(12),
        Constraint::Length(UNIT_WIDTH),
    ];
    let inputs = Table::new(input_rows, widths)
        .block(Block::default().borders(Borders::ALL).title(format!("{} - Inputs", calculator.title)))
        .column_spacing(1);
    f.render_widget(inputs, chunks[0]);

    let output_rows: Vec<Row> = calculator
        .outputs
        .iter()
        .map(|field| {
            Row::new(vec![
                Cell::from(field.label).style(Style::default().fg(Color::Yellow)),
                Cell::from(app.page.get_output(field.id).to_string())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(field.unit),
            ])
        })
        .collect();

    let outputs = Table::new(output_rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .column_spacing(1);
    f.render_widget(outputs, chunks[1]);

    if editing {
        let prefix: String = app.input.chars().take(app.cursor_position).collect();
        let x = chunks[0].x + 1 + LABEL_WIDTH + 1 + prefix.chars().count() as u16;
        let y = chunks[0].y + 1 + app.selected_field as u16;
        f.set_cursor_position(Position::new(x, y));
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "↑↓: field | Tab/←→: calculator | Enter: edit | r: reset | y: copy | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => format!("Editing {}: {} (Enter to keep, Esc to restore)", app.current_field().label, app.input),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("quickcalc Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"QUICKCALC REFERENCE

=== INPUT FIELDS ===
• Results update on every keystroke
• Numbers are read from the start of the field: "4.7k" reads as 4.7
• Exponents work: 1e3, 2.2e-6
• A field with no leading number counts as empty
• — means the inputs are outside the formula's domain

=== RESULT FORMAT ===
Most results use a fixed number of decimals. Results without one switch
to scientific notation below 0.01 or from 1000 upwards (1.50e+3).

=== CALCULATORS ===
Voltage Divider     Vout = Vin·R2/(R1+R2), I = Vin/(R1+R2)
Buck/Boost          Vout = Vref·(1 + R1/R2)
NTC Thermistor      R = Rs·adc/(max−adc), 1/T = 1/T0 + ln(R/R0)/β
                    T0 = 25 °C, ADC resolution clamped to 8-16 bit
                    ∞ = ADC at full scale (open), 0 = ADC at zero (short)
Battery Runtime     t = capacity·factor/current (factor defaults to 1)
Ohm's Law / Power   P from V·I, then I²R, then V²/R; R = V/I or given R
ADC Voltage         V = count/max·Vref, scaled by the input divider gain
Cable Voltage Drop  R = ρ·2·L/A, drop = I·R
AWG Wire Gauge      d = 0.127·92^((36−n)/39) mm, -3 = 0000 AWG

=== NAVIGATION SHORTCUTS ===
F1 or ?         Show this help (scroll with ↑↓, PgUp/PgDn, Home)
↑↓ or j/k       Select input field
Tab / → / l     Next calculator
Shift+Tab / ← / h Previous calculator
Enter/F2        Edit selected field
Backspace/Del   Clear selected field
r or Ctrl+R     Reset calculator to its defaults
y               Copy inputs and results to the clipboard
q               Quit application

=== EDITING ===
Enter/Tab       Keep the text and move to the next field
Esc             Restore the text the field had before editing
←→ Home End     Move the cursor

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

Start-up defaults can be set in ~/.config/quickcalc/config.toml."#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_shows_inputs_and_results() {
        let app = App::default();
        let screen = rendered(&app);
        assert!(screen.contains("Voltage Divider"));
        assert!(screen.contains("Input voltage"));
        assert!(screen.contains("2.500"));
        assert!(screen.contains("Results"));
    }

    #[test]
    fn test_render_help_popup() {
        let mut app = App::default();
        app.mode = AppMode::Help;
        let screen = rendered(&app);
        assert!(screen.contains("QUICKCALC REFERENCE"));
    }
}
