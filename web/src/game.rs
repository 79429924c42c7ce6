use crate::theme::Theme;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use memorito_core as game;
use yew::prelude::*;

/// Clock granularity: the engine's elapsed-seconds counter advances once per
/// tick.
const TICK_INTERVAL_MS: u32 = 1_000;

/// Cool-down a mismatched pair stays face up before it is hidden again.
const FLIP_BACK_DELAY_MS: u32 = 1_000;

const MAX_GRID_COLUMNS: u8 = 8;

const RANGE_MESSAGE: &str = "Please enter a number between 4 and 100";
const EVEN_MESSAGE: &str = "Please enter an even number";

/// Turns the raw setup-form input into a validated configuration. The engine
/// only classifies configuration errors; the human-readable wording lives
/// here.
pub(crate) fn parse_card_count(input: &str) -> Result<game::GameConfig, &'static str> {
    let count: game::CardCount = input.trim().parse().map_err(|_| RANGE_MESSAGE)?;
    if !(game::MIN_CARD_COUNT..=game::MAX_CARD_COUNT).contains(&count) {
        return Err(RANGE_MESSAGE);
    }
    game::GameConfig::from_card_count(count).map_err(|_| EVEN_MESSAGE)
}

/// Column count for the board grid: ceil(sqrt(n)), capped at 8.
pub(crate) fn grid_columns(card_count: game::CardCount) -> u8 {
    let mut columns: u8 = 1;
    while u16::from(columns) * u16::from(columns) < u16::from(card_count) {
        columns += 1;
    }
    columns.min(MAX_GRID_COLUMNS)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SetCardCount(String),
    StartGame,
    CardClicked(game::CardIndex),
    Tick,
    FlipBack,
    Restart,
    ToggleTheme,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    card: game::Card,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use game::CardState::*;

    let CardProps {
        index,
        card,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match card.state {
            FaceDown => classes!(),
            FaceUp => classes!("flipped"),
            Matched => classes!("flipped", "matched"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        callback.emit(index);
        log::trace!("card {} clicked", index);
    });

    let face = match card.state {
        FaceDown => "?".to_string(),
        FaceUp | Matched => card.value.to_string(),
    };

    html! {
        <div {class} {onclick}>
            <div class="card-face">{face}</div>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    card_count_input: String,
    input_error: Option<&'static str>,
    game: Option<game::PlayEngine>,
    result: Option<game::GameResult>,
    seed: u64,
    theme: Theme,
    tick_interval: Option<Interval>,
    flip_back: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_INTERVAL_MS, move || link.send_message(Msg::Tick))
    }

    fn start_game(&mut self, ctx: &Context<Self>) -> bool {
        match parse_card_count(&self.card_count_input) {
            Err(message) => {
                self.input_error = Some(message);
                true
            }
            Ok(config) => {
                use game::DeckGenerator;

                log::debug!(
                    "starting game: {} cards, seed {}",
                    config.card_count(),
                    self.seed
                );
                let deck = game::RandomDeckGenerator::new(self.seed).generate(config);

                self.input_error = None;
                self.result = None;
                // replacing the timers drops any clock or flip-back left over
                // from a discarded session
                self.flip_back = None;
                self.tick_interval = Some(Self::create_timer(ctx));
                self.game = Some(game::PlayEngine::new(deck));
                true
            }
        }
    }

    fn flip_card(&mut self, ctx: &Context<Self>, index: game::CardIndex) -> bool {
        let Some(engine) = self.game.as_mut() else {
            return false;
        };

        match engine.flip(index) {
            Ok(outcome) => {
                if outcome.needs_flip_back() {
                    let link = ctx.link().clone();
                    self.flip_back = Some(Timeout::new(FLIP_BACK_DELAY_MS, move || {
                        link.send_message(Msg::FlipBack)
                    }));
                }
                if let game::FlipOutcome::Won(result) = outcome {
                    log::debug!("won: {:?}", result);
                    self.result = Some(result);
                    self.tick_interval = None;
                }
                outcome.has_update()
            }
            Err(err) => {
                log::warn!("flip at {} failed: {}", index, err);
                false
            }
        }
    }

    fn view_setup(&self, ctx: &Context<Self>) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            Msg::SetCardCount(input.value())
        });
        let cb_start = ctx.link().callback(|_| Msg::StartGame);

        html! {
            <section class="setup">
                <label for="card-count">{"Number of cards (4-100, even)"}</label>
                <input
                    id="card-count"
                    type="number"
                    min="4"
                    max="100"
                    step="2"
                    value={self.card_count_input.clone()}
                    {oninput}
                />
                <div class="error-message">{self.input_error.unwrap_or_default()}</div>
                <button onclick={cb_start}>{"Start Game"}</button>
            </section>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, engine: &game::PlayEngine) -> Html {
        let grid_style = format!(
            "grid-template-columns: repeat({}, 1fr);",
            grid_columns(engine.card_count())
        );
        let cb_restart = ctx.link().callback(|_| Msg::Restart);

        let banner = self
            .result
            .map(|result| {
                html! {
                    <div class="game-over">
                        {format!(
                            "Congratulations! You won in {} moves and {} seconds!",
                            result.moves, result.elapsed_secs
                        )}
                    </div>
                }
            })
            .unwrap_or_default();

        html! {
            <section class="game">
                <nav>
                    <aside>{format!("Moves: {}", engine.move_count())}</aside>
                    <aside>{format!("Time: {}s", engine.elapsed_secs())}</aside>
                    <aside>{format!("Pairs: {}/{}", engine.matched_pairs(), engine.pair_count())}</aside>
                    <button onclick={cb_restart}>{"Restart"}</button>
                </nav>
                {banner}
                <div class="card-container" style={grid_style}>
                    {
                        for (0..engine.card_count()).map(|index| {
                            let card = engine.card_at(index);
                            let locked = !engine.can_flip_at(index);
                            let callback = ctx.link().callback(Msg::CardClicked);
                            html! {
                                <CardView {index} {card} {locked} {callback}/>
                            }
                        })
                    }
                </div>
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx
            .props()
            .seed
            .as_deref()
            .and_then(|seed| seed.parse().ok())
            .unwrap_or_else(js_random_seed);

        Self {
            card_count_input: "8".to_string(),
            input_error: None,
            game: None,
            result: None,
            seed,
            theme: Theme::init(),
            tick_interval: None,
            flip_back: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SetCardCount(value) => {
                self.card_count_input = value;
                false
            }
            StartGame => self.start_game(ctx),
            CardClicked(index) => self.flip_card(ctx, index),
            Tick => match self.game.as_mut() {
                Some(engine) => {
                    engine.tick();
                    true
                }
                None => false,
            },
            FlipBack => {
                self.flip_back = None;
                match self.game.as_mut() {
                    // safe after the session is gone, nothing to resolve
                    None => false,
                    Some(engine) => {
                        engine.resolve_mismatch();
                        true
                    }
                }
            }
            Restart => {
                self.tick_interval = None;
                self.flip_back = None;
                self.game = None;
                self.result = None;
                self.seed = js_random_seed();
                true
            }
            ToggleTheme => {
                self.theme = self.theme.toggled();
                Theme::apply(self.theme);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match &self.game {
            None => self.view_setup(ctx),
            Some(engine) => self.view_board(ctx, engine),
        };

        let cb_toggle_theme = ctx.link().callback(|_| Msg::ToggleTheme);

        html! {
            <div class="memorito">
                <header>
                    <h1>{"Memory Match"}</h1>
                    <button class="theme-toggle" onclick={cb_toggle_theme}>
                        {self.theme.toggle_label()}
                    </button>
                </header>
                {body}
            </div>
        }
    }
}
