use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Raw event frame as it travels over the socket
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WireEvent {
    pub event: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl WireEvent {
    pub fn new(event: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            event: event.into(),
            args,
        }
    }

    /// Frame with no arguments
    pub fn bare(event: impl Into<String>) -> Self {
        Self::new(event, Vec::new())
    }
}

/// Errors raised while decoding an inbound frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("event '{event}' is missing argument {position}")]
    MissingArgument { event: &'static str, position: usize },

    #[error("event '{event}' has an invalid payload: {message}")]
    InvalidPayload { event: &'static str, message: String },
}

/// Chess move as the server encodes it. `promotion` is empty when absent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MovePayload {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub promotion: String,
}

impl MovePayload {
    pub fn new(from: impl Into<String>, to: impl Into<String>, promotion: Option<char>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            promotion: promotion.map(String::from).unwrap_or_default(),
        }
    }

    pub fn promotion_char(&self) -> Option<char> {
        self.promotion.chars().next()
    }
}

/// Indices of a matched pair plus the tile code they shared
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct MatchedTiles {
    #[serde(default)]
    pub matches: Vec<usize>,
    #[serde(default)]
    pub tile: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TileUpgrade {
    pub index: usize,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PlayerSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chess_color: String,
    #[serde(default = "default_connected")]
    pub connected: bool,
}

fn default_connected() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PlayerInfo {
    #[serde(default)]
    pub player1: Option<PlayerSummary>,
    #[serde(default)]
    pub player2: Option<PlayerSummary>,
}

/// Terminal event payload. `player1` is the winner unless the result is a stalemate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct GameOverInfo {
    #[serde(default)]
    pub player1: Option<PlayerSummary>,
    #[serde(default)]
    pub player2: Option<PlayerSummary>,
    #[serde(default)]
    pub result: String,
}

/// Room chat line as the server broadcasts it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ChatMessage {
    #[serde(default)]
    pub chat: String,
    #[serde(default)]
    pub author: String,
}

/// The three server rejections of a submitted move
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    IllegalMove,
    InvalidMove,
    IllegalFen,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    Checkmate,
    Stalemate,
    Timeout,
    GameOver,
}

/// Every server event the client core reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum InboundEvent {
    Turn {
        player: String,
        clocks: Option<[u32; 2]>,
    },
    ChessBoard {
        fen: String,
    },
    MemoryBoard {
        tiles: Vec<String>,
    },
    PieceMoved {
        mv: MovePayload,
        piece: Option<String>,
        captured: Option<String>,
        player: Option<String>,
    },
    MoveRejected {
        kind: RejectionKind,
        detail: Option<String>,
    },
    TileFlipped {
        index: usize,
        tile: Option<String>,
        player: Option<String>,
    },
    SelectPiece {
        code: String,
    },
    SquareCleared {
        square: String,
        piece: Option<String>,
        player: Option<String>,
    },
    ClearFailed,
    TilesMatched {
        matched: MatchedTiles,
        player: Option<String>,
    },
    UnflipTiles {
        indices: Vec<usize>,
    },
    RemoveTiles {
        indices: Vec<usize>,
    },
    UpgradeTiles {
        upgrades: Vec<TileUpgrade>,
    },
    GameReset,
    OpponentDisconnected,
    GameEnded {
        reason: EndReason,
        info: Option<GameOverInfo>,
    },
    PlayerTimes {
        times: [u32; 2],
    },
    RoomFull {
        state: String,
    },
    RoomJoined {
        room_id: String,
        room_type: String,
    },
    PlayerInfo(PlayerInfo),
    Chat(ChatMessage),
}

/// Names of every inbound event, in the order the server documents them
pub const INBOUND_EVENTS: &[&str] = &[
    "turn",
    "chess_board",
    "memory_board",
    "piece_moved",
    "illegal_move",
    "invalid_move",
    "illegal_fen",
    "tile_flipped",
    "select_piece",
    "square_cleared",
    "clear_failed",
    "tiles_matched",
    "unflip_tiles",
    "remove_tiles",
    "upgrade_tile",
    "game_reset",
    "opponent_disconnected",
    "checkmate",
    "stalemate",
    "timeout",
    "game_over",
    "player_times",
    "room_full",
    "room_joined",
    "player_info",
    "chat",
];

impl InboundEvent {
    /// Event name this variant is delivered under
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::Turn { .. } => "turn",
            InboundEvent::ChessBoard { .. } => "chess_board",
            InboundEvent::MemoryBoard { .. } => "memory_board",
            InboundEvent::PieceMoved { .. } => "piece_moved",
            InboundEvent::MoveRejected { kind, .. } => match kind {
                RejectionKind::IllegalMove => "illegal_move",
                RejectionKind::InvalidMove => "invalid_move",
                RejectionKind::IllegalFen => "illegal_fen",
            },
            InboundEvent::TileFlipped { .. } => "tile_flipped",
            InboundEvent::SelectPiece { .. } => "select_piece",
            InboundEvent::SquareCleared { .. } => "square_cleared",
            InboundEvent::ClearFailed => "clear_failed",
            InboundEvent::TilesMatched { .. } => "tiles_matched",
            InboundEvent::UnflipTiles { .. } => "unflip_tiles",
            InboundEvent::RemoveTiles { .. } => "remove_tiles",
            InboundEvent::UpgradeTiles { .. } => "upgrade_tile",
            InboundEvent::GameReset => "game_reset",
            InboundEvent::OpponentDisconnected => "opponent_disconnected",
            InboundEvent::GameEnded { reason, .. } => match reason {
                EndReason::Checkmate => "checkmate",
                EndReason::Stalemate => "stalemate",
                EndReason::Timeout => "timeout",
                EndReason::GameOver => "game_over",
            },
            InboundEvent::PlayerTimes { .. } => "player_times",
            InboundEvent::RoomFull { .. } => "room_full",
            InboundEvent::RoomJoined { .. } => "room_joined",
            InboundEvent::PlayerInfo(_) => "player_info",
            InboundEvent::Chat(_) => "chat",
        }
    }

    /// Decode a raw frame into a typed event
    pub fn decode(frame: &WireEvent) -> Result<Self, ProtocolError> {
        let name = INBOUND_EVENTS
            .iter()
            .copied()
            .find(|known| *known == frame.event)
            .ok_or_else(|| ProtocolError::UnknownEvent(frame.event.clone()))?;
        let args = Args {
            event: name,
            values: &frame.args,
        };

        let event = match name {
            "turn" => InboundEvent::Turn {
                player: args.string(0)?,
                clocks: args.optional_clocks(1)?,
            },
            "chess_board" => InboundEvent::ChessBoard {
                fen: args.string(0)?,
            },
            "memory_board" => InboundEvent::MemoryBoard {
                tiles: args.memory_board(0)?,
            },
            "piece_moved" => InboundEvent::PieceMoved {
                mv: args.parse(0)?,
                piece: args.non_empty_string(1),
                captured: args.non_empty_string(2),
                player: args.non_empty_string(3),
            },
            "illegal_move" => InboundEvent::MoveRejected {
                kind: RejectionKind::IllegalMove,
                detail: args.describe(0),
            },
            "invalid_move" => InboundEvent::MoveRejected {
                kind: RejectionKind::InvalidMove,
                detail: args.describe(0),
            },
            "illegal_fen" => InboundEvent::MoveRejected {
                kind: RejectionKind::IllegalFen,
                detail: args.describe(0),
            },
            "tile_flipped" => InboundEvent::TileFlipped {
                index: args.index(0)?,
                tile: args.non_empty_string(1),
                player: args.non_empty_string(2),
            },
            "select_piece" => InboundEvent::SelectPiece {
                code: args.string(0)?,
            },
            "square_cleared" => InboundEvent::SquareCleared {
                square: args.string(0)?,
                piece: args.non_empty_string(1),
                player: args.non_empty_string(2),
            },
            "clear_failed" => InboundEvent::ClearFailed,
            "tiles_matched" => InboundEvent::TilesMatched {
                matched: args.parse(0)?,
                player: args.non_empty_string(1),
            },
            "unflip_tiles" => InboundEvent::UnflipTiles {
                indices: args.index_list()?,
            },
            "remove_tiles" => InboundEvent::RemoveTiles {
                indices: args.index_list()?,
            },
            "upgrade_tile" => InboundEvent::UpgradeTiles {
                upgrades: args.flattened()?,
            },
            "game_reset" => InboundEvent::GameReset,
            "opponent_disconnected" => InboundEvent::OpponentDisconnected,
            "checkmate" => args.game_ended(EndReason::Checkmate)?,
            "stalemate" => args.game_ended(EndReason::Stalemate)?,
            "timeout" => args.game_ended(EndReason::Timeout)?,
            "game_over" => args.game_ended(EndReason::GameOver)?,
            "player_times" => InboundEvent::PlayerTimes {
                times: args.player_times()?,
            },
            "room_full" => InboundEvent::RoomFull {
                state: args.string(0)?,
            },
            "room_joined" => InboundEvent::RoomJoined {
                room_id: args.string(0)?,
                room_type: args.non_empty_string(1).unwrap_or_else(|| "casual".to_string()),
            },
            "player_info" => InboundEvent::PlayerInfo(args.parse_or_default(0)?),
            "chat" => InboundEvent::Chat(args.chat(0)?),
            other => return Err(ProtocolError::UnknownEvent(other.to_string())),
        };
        Ok(event)
    }
}

/// Positional argument reader for one frame
struct Args<'a> {
    event: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn get(&self, position: usize) -> Result<&'a Value, ProtocolError> {
        match self.values.get(position) {
            Some(Value::Null) | None => Err(ProtocolError::MissingArgument {
                event: self.event,
                position,
            }),
            Some(value) => Ok(value),
        }
    }

    fn invalid(&self, message: impl Into<String>) -> ProtocolError {
        ProtocolError::InvalidPayload {
            event: self.event,
            message: message.into(),
        }
    }

    fn string(&self, position: usize) -> Result<String, ProtocolError> {
        self.get(position)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(format!("argument {position} is not a string")))
    }

    fn non_empty_string(&self, position: usize) -> Option<String> {
        self.values
            .get(position)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Rejection payloads are either a move string, a move object, or nothing
    fn describe(&self, position: usize) -> Option<String> {
        match self.values.get(position) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    fn index(&self, position: usize) -> Result<usize, ProtocolError> {
        let value = self.get(position)?;
        as_index(value).ok_or_else(|| self.invalid(format!("argument {position} is not an index")))
    }

    fn parse<T: DeserializeOwned>(&self, position: usize) -> Result<T, ProtocolError> {
        serde_json::from_value(self.get(position)?.clone())
            .map_err(|e| self.invalid(format!("argument {position}: {e}")))
    }

    fn parse_or_default<T: DeserializeOwned + Default>(
        &self,
        position: usize,
    ) -> Result<T, ProtocolError> {
        match self.values.get(position) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(_) => self.parse(position),
        }
    }

    /// Variadic arguments, each either a single item or an array of items
    fn flattened<T: DeserializeOwned>(&self) -> Result<Vec<T>, ProtocolError> {
        let mut items = Vec::new();
        for (position, value) in self.values.iter().enumerate() {
            match value {
                Value::Array(inner) => {
                    for item in inner {
                        items.push(
                            serde_json::from_value(item.clone())
                                .map_err(|e| self.invalid(format!("argument {position}: {e}")))?,
                        );
                    }
                }
                Value::Null => {}
                other => items.push(
                    serde_json::from_value(other.clone())
                        .map_err(|e| self.invalid(format!("argument {position}: {e}")))?,
                ),
            }
        }
        Ok(items)
    }

    fn index_list(&self) -> Result<Vec<usize>, ProtocolError> {
        let mut indices = Vec::new();
        for value in self.values {
            match value {
                Value::Array(inner) => {
                    for item in inner {
                        indices.push(as_index(item).ok_or_else(|| self.invalid("non-index entry"))?);
                    }
                }
                Value::Null => {}
                other => indices.push(as_index(other).ok_or_else(|| self.invalid("non-index entry"))?),
            }
        }
        Ok(indices)
    }

    fn memory_board(&self, position: usize) -> Result<Vec<String>, ProtocolError> {
        let tiles = memory_codes(self.get(position)?)
            .ok_or_else(|| self.invalid("memory board is neither a list nor a joined string"))?;
        if tiles.len() != 64 {
            return Err(self.invalid(format!("expected 64 tiles, got {}", tiles.len())));
        }
        Ok(tiles)
    }

    fn optional_clocks(&self, position: usize) -> Result<Option<[u32; 2]>, ProtocolError> {
        match self.values.get(position) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(times)) if times.is_empty() => Ok(None),
            Some(Value::Array(times)) if times.len() == 2 => {
                let first = as_seconds(&times[0]).ok_or_else(|| self.invalid("clock is not a number"))?;
                let second = as_seconds(&times[1]).ok_or_else(|| self.invalid("clock is not a number"))?;
                Ok(Some([first, second]))
            }
            Some(_) => Err(self.invalid("clocks must be a pair of numbers")),
        }
    }

    /// `player_times` arrives either as two positional numbers or one pair
    fn player_times(&self) -> Result<[u32; 2], ProtocolError> {
        if let Some(Value::Array(_)) = self.values.first() {
            return self
                .optional_clocks(0)?
                .ok_or_else(|| self.invalid("clocks must be a pair of numbers"));
        }
        let first = as_seconds(self.get(0)?).ok_or_else(|| self.invalid("clock is not a number"))?;
        let second = as_seconds(self.get(1)?).ok_or_else(|| self.invalid("clock is not a number"))?;
        Ok([first, second])
    }

    /// Chat arrives as `{chat, author}`; a bare string has no known author
    fn chat(&self, position: usize) -> Result<ChatMessage, ProtocolError> {
        match self.get(position)? {
            Value::String(text) => Ok(ChatMessage {
                chat: text.clone(),
                author: String::new(),
            }),
            _ => self.parse(position),
        }
    }

    fn game_ended(&self, reason: EndReason) -> Result<InboundEvent, ProtocolError> {
        let info = match self.values.first() {
            None | Some(Value::Null) => None,
            Some(_) => Some(self.parse(0)?),
        };
        Ok(InboundEvent::GameEnded { reason, info })
    }
}

fn as_index(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|i| usize::try_from(i).ok())
}

/// Clocks are clamped to zero; fractional seconds are rounded
fn as_seconds(value: &Value) -> Option<u32> {
    value.as_f64().map(|secs| secs.max(0.0).round() as u32)
}

fn memory_codes(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        Value::String(joined) => Some(joined.split(',').map(str::to_string).collect()),
        Value::Object(map) => map.get("board").and_then(memory_codes),
        _ => None,
    }
}

/// Every request the client core sends to the server
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundEvent {
    MovePiece(MovePayload),
    FlipTile { index: usize },
    MatchTiles,
    ClearSquare { square: String },
    GetChessBoard,
    GetMemoryBoard,
    GetPlayerTimes,
    PlayerInfo,
    ResetGame,
    Timeout,
    Chat(String),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::MovePiece(_) => "move_piece",
            OutboundEvent::FlipTile { .. } => "flip_tile",
            OutboundEvent::MatchTiles => "match_tiles",
            OutboundEvent::ClearSquare { .. } => "clear_square",
            OutboundEvent::GetChessBoard => "get_chess_board",
            OutboundEvent::GetMemoryBoard => "get_memory_board",
            OutboundEvent::GetPlayerTimes => "get_player_times",
            OutboundEvent::PlayerInfo => "player_info",
            OutboundEvent::ResetGame => "reset_game",
            OutboundEvent::Timeout => "timeout",
            OutboundEvent::Chat(_) => "chat",
        }
    }

    pub fn to_wire(&self) -> WireEvent {
        let args = match self {
            OutboundEvent::MovePiece(mv) => vec![json!({
                "from": mv.from,
                "to": mv.to,
                "promotion": mv.promotion,
            })],
            OutboundEvent::FlipTile { index } => vec![json!(index)],
            OutboundEvent::ClearSquare { square } => vec![json!(square)],
            OutboundEvent::Chat(text) => vec![json!(text)],
            _ => Vec::new(),
        };
        WireEvent::new(self.name(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(event: &str, args: Vec<Value>) -> WireEvent {
        WireEvent::new(event, args)
    }

    #[test]
    fn test_decode_turn_with_clocks() {
        let event = InboundEvent::decode(&frame("turn", vec![json!("p1"), json!([300, 295.6])]))
            .expect("turn should decode");
        assert_eq!(
            event,
            InboundEvent::Turn {
                player: "p1".to_string(),
                clocks: Some([300, 296]),
            }
        );
    }

    #[test]
    fn test_decode_turn_without_clocks() {
        let event = InboundEvent::decode(&frame("turn", vec![json!("p2")])).expect("turn");
        assert_eq!(
            event,
            InboundEvent::Turn {
                player: "p2".to_string(),
                clocks: None,
            }
        );
    }

    #[test]
    fn test_negative_clock_clamps_to_zero() {
        let event = InboundEvent::decode(&frame("player_times", vec![json!(-3), json!(12)]))
            .expect("player_times");
        assert_eq!(event, InboundEvent::PlayerTimes { times: [0, 12] });
    }

    #[test]
    fn test_decode_piece_moved_with_metadata() {
        let event = InboundEvent::decode(&frame(
            "piece_moved",
            vec![
                json!({"from": "e7", "to": "e8", "promotion": "n"}),
                json!("wp"),
                json!(""),
                json!("p1"),
            ],
        ))
        .expect("piece_moved");

        match event {
            InboundEvent::PieceMoved {
                mv,
                piece,
                captured,
                player,
            } => {
                assert_eq!(mv.promotion_char(), Some('n'));
                assert_eq!(piece.as_deref(), Some("wp"));
                assert_eq!(captured, None, "empty capture means nothing was taken");
                assert_eq!(player.as_deref(), Some("p1"));
            }
            other => panic!("Wrong event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_memory_board_shapes() {
        let codes: Vec<String> = (0..64).map(|i| if i % 2 == 0 { "wp" } else { "WP" }.to_string()).collect();

        let wrapped = InboundEvent::decode(&frame("memory_board", vec![json!({ "board": codes })]))
            .expect("wrapped board");
        let joined = InboundEvent::decode(&frame("memory_board", vec![json!(codes.join(","))]))
            .expect("joined board");

        assert_eq!(wrapped, joined);
        assert_eq!(wrapped, InboundEvent::MemoryBoard { tiles: codes });
    }

    #[test]
    fn test_memory_board_must_have_64_tiles() {
        let err = InboundEvent::decode(&frame("memory_board", vec![json!(["wp", "WP"])]))
            .expect_err("short board");
        assert!(matches!(err, ProtocolError::InvalidPayload { event: "memory_board", .. }));
    }

    #[test]
    fn test_variadic_indices_accept_both_forms() {
        let spread = InboundEvent::decode(&frame("unflip_tiles", vec![json!(3), json!(9)])).expect("spread");
        let packed = InboundEvent::decode(&frame("unflip_tiles", vec![json!([3, 9])])).expect("packed");
        assert_eq!(spread, packed);
        assert_eq!(spread, InboundEvent::UnflipTiles { indices: vec![3, 9] });
    }

    #[test]
    fn test_decode_upgrade_tiles() {
        let event = InboundEvent::decode(&frame(
            "upgrade_tile",
            vec![json!({"index": 4, "value": "wq"}), json!({"index": 5, "value": "WQ"})],
        ))
        .expect("upgrade_tile");
        assert_eq!(
            event,
            InboundEvent::UpgradeTiles {
                upgrades: vec![
                    TileUpgrade { index: 4, value: "wq".to_string() },
                    TileUpgrade { index: 5, value: "WQ".to_string() },
                ],
            }
        );
    }

    #[test]
    fn test_rejection_kinds_keep_their_names() {
        for name in ["illegal_move", "invalid_move", "illegal_fen"] {
            let event = InboundEvent::decode(&frame(name, vec![])).expect("rejection");
            assert_eq!(event.name(), name);
        }
    }

    #[test]
    fn test_terminal_event_info_is_optional() {
        let bare = InboundEvent::decode(&frame("stalemate", vec![])).expect("stalemate");
        assert_eq!(
            bare,
            InboundEvent::GameEnded {
                reason: EndReason::Stalemate,
                info: None,
            }
        );

        let full = InboundEvent::decode(&frame(
            "checkmate",
            vec![json!({"player1": {"id": "a", "name": "Ann"}, "player2": {"id": "b"}, "result": "checkmate"})],
        ))
        .expect("checkmate");
        match full {
            InboundEvent::GameEnded { reason, info: Some(info) } => {
                assert_eq!(reason, EndReason::Checkmate);
                assert_eq!(info.player1.map(|p| p.name), Some("Ann".to_string()));
            }
            other => panic!("Wrong event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_is_reported() {
        let err = InboundEvent::decode(&frame("emote", vec![json!("wave")])).expect_err("emote");
        assert_eq!(err, ProtocolError::UnknownEvent("emote".to_string()));
    }

    #[test]
    fn test_chat_decodes_with_author() {
        let event = InboundEvent::decode(&frame(
            "chat",
            vec![json!({"chat": "good luck", "author": "p2"})],
        ))
        .expect("chat");
        assert_eq!(
            event,
            InboundEvent::Chat(ChatMessage {
                chat: "good luck".to_string(),
                author: "p2".to_string(),
            })
        );

        let bare = InboundEvent::decode(&frame("chat", vec![json!("hi")])).expect("bare chat");
        assert_eq!(bare.name(), "chat");

        let wire = OutboundEvent::Chat("gg".to_string()).to_wire();
        assert_eq!(wire.event, "chat");
        assert_eq!(wire.args, vec![json!("gg")]);
    }

    #[test]
    fn test_missing_argument() {
        let err = InboundEvent::decode(&frame("square_cleared", vec![])).expect_err("no square");
        assert_eq!(
            err,
            ProtocolError::MissingArgument {
                event: "square_cleared",
                position: 0,
            }
        );
    }

    #[test]
    fn test_every_listed_event_name_round_trips() {
        // names reported by decoded events must be the names they were decoded from
        let samples = vec![
            frame("game_reset", vec![]),
            frame("opponent_disconnected", vec![]),
            frame("clear_failed", vec![]),
            frame("room_full", vec![json!("Ready")]),
            frame("room_joined", vec![json!("ABC123"), json!("timed")]),
            frame("player_info", vec![]),
            frame("select_piece", vec![json!("x")]),
            frame("tile_flipped", vec![json!(7)]),
        ];
        for sample in samples {
            let event = InboundEvent::decode(&sample).expect("sample decodes");
            assert_eq!(event.name(), sample.event);
            assert!(INBOUND_EVENTS.contains(&event.name()));
        }
    }

    #[test]
    fn test_outbound_move_piece_encoding() {
        let wire = OutboundEvent::MovePiece(MovePayload::new("e2", "e4", None)).to_wire();
        assert_eq!(wire.event, "move_piece");
        assert_eq!(wire.args, vec![json!({"from": "e2", "to": "e4", "promotion": ""})]);
    }

    #[test]
    fn test_outbound_bare_requests_have_no_args() {
        for event in [
            OutboundEvent::MatchTiles,
            OutboundEvent::GetChessBoard,
            OutboundEvent::GetMemoryBoard,
            OutboundEvent::GetPlayerTimes,
            OutboundEvent::ResetGame,
            OutboundEvent::Timeout,
        ] {
            assert!(event.to_wire().args.is_empty(), "{} should be bare", event.name());
        }
    }

    #[test]
    fn test_move_payload_bincode() {
        let mv = MovePayload::new("a7", "a8", Some('q'));
        let bytes = bincode::serialize(&mv).expect("Should serialize");
        let decoded: MovePayload = bincode::deserialize(&bytes).expect("Should deserialize");
        assert_eq!(decoded, mv);
    }

    #[test]
    fn test_wire_frame_json_shape() {
        let wire = OutboundEvent::FlipTile { index: 12 }.to_wire();
        let text = serde_json::to_string(&wire).expect("Should serialize");
        assert_eq!(text, r#"{"event":"flip_tile","args":[12]}"#);

        let parsed: WireEvent = serde_json::from_str(r#"{"event":"game_reset"}"#).expect("Should parse");
        assert_eq!(parsed, WireEvent::bare("game_reset"));
    }
}
