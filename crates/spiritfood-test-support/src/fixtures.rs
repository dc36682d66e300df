//! Small quiz documents for tests.

/// A three-scene quiz.
///
/// `1 --"Toast please"--> 2 --"Keep going"--> 3 (terminal)`, with
/// `"Soup please"` jumping from 1 straight to 3 and `"Stop now"` ending the
/// quiz at 2. Salad has neither cuisine nor personality, and only two
/// adjective pairs are defined.
pub const MINI_QUIZ_YAML: &str = r#"
entry_scene: "1"
default_dish: "Toast"

dishes: ["Toast", "Soup", "Salad"]

cuisines:
  "Toast": "Breakfast"
  "Soup": "Homestyle"

adjectives:
  "Comfort_Early Bird": "Sunny"
  "Balanced_Late Night": "Mellow"

personalities:
  "Toast":
    archetype: "The Early Riser"
    emoji: "🍞"
    strengths: ["Always ready"]
    weaknesses: ["Burns easily"]
    quotes: ["Rise and shine."]
    peer_reviews:
      - text: "Reliable, if a little dry."
        reviewer: "Soup"
    hidden_talent: "Pairs with anything"
  "Soup":
    archetype: "The Comforter"
    emoji: "🍲"
    strengths: ["Warm"]
    weaknesses: ["Spills"]
    quotes: ["There, there."]
    hidden_talent: "Cures colds"

scenes:
  - id: "1"
    ordinal: 1
    prompt: "Start here"
    image: "images/start.png"
    choices:
      - label: "Toast please"
        next: "2"
        dishes: ["Toast"]
        time: "Early Bird"
        adventure: "Comfort"
      - label: "Soup please"
        next: "3"
        dishes: ["Soup"]
        time: "Late Night"
        adventure: "Comfort"
  - id: "2"
    ordinal: 2
    prompt: "Keep going?"
    choices:
      - label: "Keep going"
        next: "3"
        dishes: ["Soup"]
        time: "Late Night"
      - label: "Stop now"
        next: "end"
        dishes: ["Salad"]
        adventure: "Adventurer"
        adventure_bonus: true
  - id: "3"
    ordinal: 3
    prompt: "Last one"
    terminal: true
    choices:
      - label: "Finish"
        next: "end"
        dishes: ["Soup", "Salad"]
        time: "Late Night"
        adventure: "Balanced"
        multiplier: 2
      - label: "Loop back"
        next: "1"
        dishes: ["Toast"]
"#;
