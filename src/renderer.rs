use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Rectangle},
    },
};

use crate::entities::{Enemy, Field, Formation, GameState, Projectile, Rect as FieldRect};
use crate::game::Game;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub field: Field,
    pub player: FieldRect,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Projectile],
    pub enemy_bullets: &'a [Projectile],
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub high_score: u32,
    pub enemy_speed: f32,
    pub alive_count: usize,
    pub area: Rect,
}

impl<'a> RenderView<'a> {
    pub fn new<R>(game: &'a Game<R>, area: Rect) -> Self {
        Self {
            game_state: game.state,
            field: game.field,
            player: game.player.rect(),
            enemies: game.enemies(),
            bullets: &game.bullets,
            enemy_bullets: &game.enemy_bullets,
            score: game.score,
            lives: game.lives,
            level: game.level,
            high_score: game.high_score,
            enemy_speed: game.enemy_speed(),
            alive_count: game.alive_count(),
            area,
        }
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method: play field and HUD, then the overlay for the
    /// current state
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let field_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };

        self.render_stats(frame, view, area);
        self.render_field(frame, view, field_area);
        self.render_controls(frame, view, area);

        match view.game_state {
            GameState::Playing => {}
            GameState::LevelIntro => self.render_level_intro(frame, view, field_area),
            GameState::Paused => self.render_paused(frame, field_area),
            GameState::LevelComplete => self.render_level_complete(frame, field_area),
            GameState::GameOver => self.render_game_over(frame, view, field_area),
            GameState::Quit => self.render_quit(frame, view, field_area),
        }
    }

    /// Draws the play field scaled onto a braille canvas
    fn render_field(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let field = view.field;
        let show_entities = !matches!(view.game_state, GameState::LevelIntro);

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, field.width as f64])
            .y_bounds([0.0, field.height as f64])
            .paint(|ctx| {
                if !show_entities {
                    return;
                }
                draw_rect(ctx, field, view.player, Color::Green);
                for enemy in view.enemies.iter().filter(|e| e.is_alive()) {
                    draw_rect(ctx, field, enemy.rect(), Color::Red);
                }
                ctx.layer();
                for bullet in view.bullets {
                    draw_rect(ctx, field, bullet.rect(), Color::Green);
                }
                for bullet in view.enemy_bullets {
                    draw_rect(ctx, field, bullet.rect(), Color::Red);
                }
            });

        frame.render_widget(canvas, area);
    }

    /// Stats overlay at the top
    fn render_stats(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let lives_color = if view.lives > 1 {
            Color::Green
        } else {
            Color::Red
        };

        let stats = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(format!("{}", view.score), value(Color::Yellow)),
            Span::styled("  Lives: ", label),
            Span::styled(format!("{}", view.lives), value(lives_color)),
            Span::styled("  Level: ", label),
            Span::styled(format!("{}", view.level), value(Color::Cyan)),
            Span::styled("  Enemies: ", label),
            Span::styled(format!("{}", view.alive_count), value(Color::Red)),
            Span::styled("  Speed: ", label),
            Span::styled(format!("{:.1}", view.enemy_speed), value(Color::Magenta)),
            Span::styled("  High Score: ", label),
            Span::styled(format!("{}", view.high_score), value(Color::White)),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);
    }

    /// Controls hint at bottom
    fn render_controls(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let hint = match view.game_state {
            GameState::Playing => "[A/D/Arrows: Move] [Space: Fire] [P: Pause] [Esc: Exit]",
            GameState::Paused => "[P: Resume] [Q: Quit] [Esc: Exit]",
            GameState::LevelIntro | GameState::LevelComplete => {
                "[Space: Continue] [Q: Quit] [Esc: Exit]"
            }
            GameState::GameOver | GameState::Quit => "[R: Restart] [Esc: Exit]",
        };

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )))
            .centered(),
            controls_area,
        );
    }

    fn render_level_intro(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(format!("LEVEL {}", view.level)).bold().green(),
            Line::from(""),
            Line::from(format!(
                "Speed: {:.1}",
                Formation::speed_for_level(view.level)
            ))
            .white(),
            Line::from(""),
            Line::from("Press SPACE to Start").white(),
        ];
        render_panel(frame, area, text, Color::Green, 8);
    }

    fn render_paused(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("PAUSED").bold().yellow(),
            Line::from(""),
            Line::from("Press P to Resume").white(),
            Line::from("Press Q to Quit").white(),
        ];
        render_panel(frame, area, text, Color::Yellow, 7);
    }

    fn render_level_complete(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("LEVEL COMPLETE!").bold().green(),
            Line::from(""),
            Line::from("Press SPACE for Next Level").white(),
        ];
        render_panel(frame, area, text, Color::Green, 6);
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("GAME OVER").bold().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score)).yellow().bold(),
            Line::from(format!("High Score: {}", view.high_score)).cyan(),
            Line::from(""),
            Line::from("Press R to Restart").white(),
        ];
        render_panel(frame, area, text, Color::Red, 9);
    }

    fn render_quit(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("GAME QUIT").bold().green(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score)).yellow().bold(),
            Line::from(format!("Level Reached: {}", view.level)).white(),
            Line::from(format!("High Score: {}", view.high_score)).cyan(),
            Line::from(""),
            Line::from("Press R to Restart").white(),
        ];
        render_panel(frame, area, text, Color::Green, 10);
    }
}

/// Draw a field rectangle; the canvas y axis points up, the field's down
fn draw_rect(ctx: &mut Context, field: Field, rect: FieldRect, color: Color) {
    ctx.draw(&Rectangle {
        x: rect.x as f64,
        y: (field.height - rect.y - rect.height) as f64,
        width: rect.width as f64,
        height: rect.height as f64,
        color,
    });
}

/// Bordered, centered message box over the play field
fn render_panel(frame: &mut Frame, area: Rect, text: Vec<Line>, color: Color, height: u16) {
    let panel = centered(area, 34, height);
    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .alignment(Alignment::Center),
        panel,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
