/// Parsing of what the user types at the "Which do you prefer?" prompt.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The item shown on the left (option 1).
    PickLeft,
    /// The item shown on the right (option 2).
    PickRight,
    Skip,
    Cancel,
    Resume,
    Prioritize(String),
    /// Remove the item at this 1-based rank.
    Remove(usize),
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
  1 / a / left     prefer the left item
  2 / b / right    prefer the right item
  s / skip         send this item to the back of the queue
  c / cancel       stop on this item without ranking it
  r / resume       continue after a cancel
  p <name>         rank <name> next
  d <rank>         remove the item at <rank> from the ranking
  l / list         show the current ranking
  q / quit         stop and print results
  ? / help         this help";

/// Split "verb rest" into a lowercase verb and the untouched remainder.
fn split_verb(line: &str) -> (String, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Err("Type 1 or 2 to choose (? for help)".to_string());
    }

    let (verb, rest) = split_verb(line);
    let command = match verb.as_str() {
        "1" | "a" | "left" => Command::PickLeft,
        "2" | "b" | "right" => Command::PickRight,
        "s" | "skip" => Command::Skip,
        "c" | "cancel" => Command::Cancel,
        "r" | "resume" => Command::Resume,
        "l" | "list" | "ls" => Command::List,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "p" | "prioritize" | "next" => {
            if rest.is_empty() {
                return Err(format!("\"{verb}\" needs an item name"));
            }
            return Ok(Command::Prioritize(rest.to_string()));
        }
        "d" | "del" | "remove" => {
            let rank = rest
                .trim_start_matches('#')
                .parse::<usize>()
                .map_err(|_| format!("\"{verb}\" needs a rank number, got \"{rest}\""))?;
            return Ok(Command::Remove(rank));
        }
        _ => return Err(format!("Unknown command \"{line}\" (? for help)")),
    };

    if !rest.is_empty() {
        return Err(format!("\"{verb}\" takes no arguments"));
    }
    Ok(command)
}
