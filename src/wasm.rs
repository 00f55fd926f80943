use wasm_bindgen::prelude::*;

use crate::game::GameInstance;
use crate::types::Position;

/// A game session owned by the front end.
#[wasm_bindgen]
pub struct CheckersGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: GameInstance::new_with_default_selector(),
        }
    }

    /// Current `GameState` as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    /// Highlights and returns the destinations of the piece at `(row, col)`.
    pub fn inspect(&mut self, row: i8, col: i8) -> Result<JsValue, JsValue> {
        let destinations = self.inner.inspect(Position::new(row, col));
        Ok(serde_wasm_bindgen::to_value(&destinations)?)
    }

    #[wasm_bindgen(js_name = clearHighlights)]
    pub fn clear_highlights(&mut self) {
        self.inner.clear_highlights();
    }

    /// Plays a user move and returns the new state.
    pub fn play(
        &mut self,
        start_row: i8,
        start_col: i8,
        end_row: i8,
        end_col: i8,
    ) -> Result<JsValue, JsValue> {
        self.inner
            .place(
                Position::new(start_row, start_col),
                Position::new(end_row, end_col),
            )
            .map_err(to_js_error)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(to_js_error)?;
        self.state()
    }

    /// `GameResult` once the game is over, `undefined` before.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_result())?)
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: crate::error::GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
