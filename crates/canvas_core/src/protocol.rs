//! Agent-facing protocol description.
//!
//! The text is meant for the agent's system prompt so it emits commands the
//! parser understands.

const PROTOCOL_INSTRUCTIONS: &str = r##"You can draw on a shared canvas by writing commands in your reply.

Inline form, one command per line:
  /canvas create <type> {"param": value, ...}
  /canvas update <elementId> {"param": value, ...}
  /canvas delete <elementId>
  /canvas select <elementId>
  /canvas deselect
  /canvas clear

Block form, one fenced code block holding a command object or an array:
  ```json
  [
    {"command": "create", "elementType": "circle", "params": {"radius": 2}},
    {"command": "update", "elementId": "<id>", "params": {"color": "#00ff00"}}
  ]
  ```
Only the first fenced block of a message is read.

Verbs: create, update, delete, clear, select, deselect.

Element types and their params (defaults in parentheses):
  circle:    radius (1), segments, filled (true), lineWidth (1)
  rectangle: width (2), height (1), filled (true), lineWidth (1)
  line:      points ([[0,0,0],[1,1,0]]), lineWidth (1)
  polygon:   points (a unit square), filled (true), lineWidth (1)
  text:      text ("Text"), fontSize (1), fontColor
  image:     url ("/logo.jpg"), width (3), height (2)

Common params for every type:
  position [x,y,z] ([0,0,0]), rotation [x,y,z] in radians ([0,0,0]),
  scale [x,y,z] ([1,1,1]), color ("#ffffff"), opacity 0..1 (1)

An element's type cannot be changed by update; delete and recreate instead.
"##;

/// Returns the protocol description for agent prompts.
pub fn protocol_instructions() -> &'static str {
    PROTOCOL_INSTRUCTIONS
}
