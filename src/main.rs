//! Guess the Airline entry point
//!
//! On the web this exposes the round engine and preference toggles to the
//! page script; natively it plays a short scripted session as a smoke check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Bundled airline list
const CATALOG_JSON: &str = include_str!("../assets/airlines.json");

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use guess_the_airline::persistence::LocalStore;
    use guess_the_airline::{Catalog, QuizError, RoundEngine, Toggle};

    /// Everything the page talks to
    struct Game {
        engine: RoundEngine<LocalStore>,
        mute: Toggle<LocalStore>,
        theme: Toggle<LocalStore>,
    }

    thread_local! {
        static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
    }

    fn js_error(err: QuizError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
        serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn with_game<T>(f: impl FnOnce(&mut Game) -> Result<T, JsValue>) -> Result<T, JsValue> {
        GAME.with(|cell| match cell.borrow_mut().as_mut() {
            Some(game) => f(game),
            None => Err(JsValue::from_str("game not started")),
        })
    }

    /// Build the session. A bad catalog rejects here so the page can show
    /// the message instead of an empty board.
    pub fn start() -> Result<(), JsValue> {
        let catalog = Catalog::from_json(super::CATALOG_JSON).map_err(js_error)?;
        let store = LocalStore::new();
        let engine = RoundEngine::new(catalog, store.clone()).map_err(js_error)?;
        let game = Game {
            engine,
            mute: Toggle::mute(store.clone()),
            theme: Toggle::theme(store),
        };
        log::info!(
            "Guess the Airline ready (muted={}, theme={:?})",
            game.mute.value(),
            game.theme.current_theme()
        );
        GAME.with(|cell| *cell.borrow_mut() = Some(game));
        Ok(())
    }

    /// Current render state as JSON
    #[wasm_bindgen]
    pub fn snapshot() -> Result<String, JsValue> {
        with_game(|game| to_json(&game.engine.snapshot()))
    }

    /// Click on an option; returns the new render state
    #[wasm_bindgen]
    pub fn answer(airline_id: &str) -> Result<String, JsValue> {
        with_game(|game| {
            game.engine.answer_id(airline_id);
            to_json(&game.engine.snapshot())
        })
    }

    /// Click on NEXT; returns the new render state
    #[wasm_bindgen]
    pub fn next_question() -> Result<String, JsValue> {
        with_game(|game| {
            game.engine.next().map_err(js_error)?;
            to_json(&game.engine.snapshot())
        })
    }

    /// Read-only view of the active answer, for browser automation
    #[wasm_bindgen]
    pub fn current_correct_answer() -> Result<String, JsValue> {
        with_game(|game| to_json(game.engine.correct_answer()))
    }

    /// Flip mute; returns the class for the mute button
    #[wasm_bindgen]
    pub fn toggle_mute() -> Result<String, JsValue> {
        with_game(|game| {
            game.mute.toggle();
            Ok(game.mute.css_class().to_string())
        })
    }

    #[wasm_bindgen]
    pub fn mute_class() -> Result<String, JsValue> {
        with_game(|game| Ok(game.mute.css_class().to_string()))
    }

    /// Flip theme; returns the new `<body>` class
    #[wasm_bindgen]
    pub fn toggle_theme() -> Result<String, JsValue> {
        with_game(|game| {
            game.theme.toggle();
            Ok(game.theme.current_theme().body_class().to_string())
        })
    }

    #[wasm_bindgen]
    pub fn theme_class() -> Result<String, JsValue> {
        with_game(|game| Ok(game.theme.current_theme().body_class().to_string()))
    }

    #[wasm_bindgen]
    pub fn theme_icon() -> Result<String, JsValue> {
        with_game(|game| Ok(game.theme.current_theme().toggle_icon().to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Guess the Airline starting...");
    wasm_game::start()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> guess_the_airline::QuizResult<()> {
    use guess_the_airline::{AnswerOutcome, Catalog, MemoryStore, RoundEngine};

    env_logger::init();
    log::info!("Guess the Airline (native) starting...");
    log::info!("Native mode has no UI - playing a scripted session");

    let catalog = Catalog::from_json(CATALOG_JSON)?;
    let mut engine = RoundEngine::new(catalog, MemoryStore::new())?;

    // Two right, one wrong, one right
    for round in 0..4 {
        let question = engine.question().clone();
        let pick = if round == 2 {
            question
                .options()
                .iter()
                .find(|a| !question.is_correct(a))
                .unwrap_or(question.correct())
                .clone()
        } else {
            question.correct().clone()
        };

        let outcome = engine.answer(&pick);
        let feedback = engine
            .feedback()
            .map(|f| f.message.as_str())
            .unwrap_or_default();
        println!(
            "{:>3} -> {:<22} {:<28} {}  HI-SCORE: {}",
            question.iata_code(),
            pick.name,
            feedback,
            engine.score_line(),
            engine.hi_score()
        );
        if matches!(outcome, AnswerOutcome::Correct { new_hi_score: true, .. }) {
            log::debug!("Hi-score raised in round {}", round + 1);
        }
        engine.next()?;
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
