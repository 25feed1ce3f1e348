use super::zone::Zone;

/// Signed lattice coordinates for each zone, with the center at the origin.
fn lattice(zone: Zone) -> (i32, i32) {
    match zone {
        Zone::TopLeft => (-1, -1),
        Zone::TopRight => (1, -1),
        Zone::BottomLeft => (-1, 1),
        Zone::BottomRight => (1, 1),
        Zone::Center => (0, 0),
    }
}

/// Spoken movement instruction taking the user from `current` toward
/// `target`.
///
/// Builds up to two clauses from the lattice delta, vertical first. When
/// the zones already match (classification and containment can disagree
/// near zone boundaries) a fixed per-zone nudge is used instead so the
/// instruction is never empty.
pub fn phrase_for(current: Zone, target: Zone) -> String {
    let (cx, cy) = lattice(current);
    let (tx, ty) = lattice(target);
    let dx = tx - cx;
    let dy = ty - cy;

    let mut parts: Vec<&str> = Vec::with_capacity(2);
    if dy < 0 {
        parts.push("one step forward");
    } else if dy > 0 {
        parts.push("one step back without turning around");
    }
    if dx < 0 {
        parts.push("one side-step to your left");
    } else if dx > 0 {
        parts.push("one side-step to your right");
    }

    if parts.is_empty() {
        return self_pair_nudge(current).to_string();
    }
    format!("Take {}", parts.join(" and "))
}

/// Nudge away from a zone the user nominally already occupies.
fn self_pair_nudge(zone: Zone) -> &'static str {
    match zone {
        Zone::TopLeft => "Take one side-step to your left and one step forward",
        Zone::TopRight => "Take one side-step to your right and one step forward",
        Zone::BottomRight => {
            "Take one side-step to your right and one step back without turning around"
        }
        Zone::BottomLeft => {
            "Take one side-step to your left and one step back without turning around"
        }
        Zone::Center => "Take one side-step to your right",
    }
}
