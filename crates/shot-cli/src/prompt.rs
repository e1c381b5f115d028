//! Operator interaction.
//!
//! Every question the `transform` command asks goes through [`Operator`], so
//! the whole run can be driven by a script in tests or by `--yes`.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use shot_model::{ClubId, RecordId, ShotType, TargetDistance, Unit};
use shot_report::format_value;
use shot_transform::{ClubReview, CurationOperator};

/// Questions asked during a transform run, on top of the curation walk.
pub trait Operator: CurationOperator {
    /// Target distance for `club` in this run.
    fn target_distance(
        &mut self,
        club: ClubId,
        shots: usize,
        default: TargetDistance,
        unit: Unit,
    ) -> io::Result<TargetDistance>;

    fn shot_type(&mut self, club: ClubId, shots: usize, default: ShotType) -> io::Result<ShotType>;

    /// Final confirmation before the export file is written.
    fn confirm_export(&mut self, shots: usize) -> io::Result<bool>;
}

/// Answers every question with its default and skips curation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl CurationOperator for AcceptDefaults {
    fn begin(&mut self, _clubs: &[ClubId], _shots: usize) -> io::Result<bool> {
        Ok(false)
    }

    fn review(&mut self, _review: &ClubReview<'_>) -> io::Result<Vec<RecordId>> {
        Ok(Vec::new())
    }
}

impl Operator for AcceptDefaults {
    fn target_distance(
        &mut self,
        _club: ClubId,
        _shots: usize,
        default: TargetDistance,
        _unit: Unit,
    ) -> io::Result<TargetDistance> {
        Ok(default)
    }

    fn shot_type(&mut self, _club: ClubId, _shots: usize, default: ShotType) -> io::Result<ShotType> {
        Ok(default)
    }

    fn confirm_export(&mut self, _shots: usize) -> io::Result<bool> {
        Ok(true)
    }
}

/// Line-based prompts: questions go to `output`, answers are read from `input`.
///
/// Invalid answers are explained and asked again. Closing the input while a
/// question is pending is an `UnexpectedEof` error.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl LinePrompt<StdinLock<'static>, Stderr> {
    /// Prompts on stderr so stdout only carries tables.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => writeln!(self.output, "  {message}")?,
            }
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        self.ask_until(&format!("{question} {hint}"), |answer| {
            parse_yes_no(answer, default).ok_or_else(|| "Please answer y or n.".to_string())
        })
    }
}

impl<R: BufRead, W: Write> CurationOperator for LinePrompt<R, W> {
    fn begin(&mut self, clubs: &[ClubId], shots: usize) -> io::Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "{shots} shots across {} clubs.", clubs.len())?;
        self.confirm("Would you like to review and remove specific shots?", false)
    }

    fn review(&mut self, review: &ClubReview<'_>) -> io::Result<Vec<RecordId>> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{} - {} shots ({}/{})",
            review.club,
            review.shots.len(),
            review.position + 1,
            review.club_count
        )?;
        for (number, (_, record)) in review.shots.iter().enumerate() {
            writeln!(
                self.output,
                "  #{:>2}  {:<8}  Target: {:>3}  Total: {:>8}  Side: {:>8}",
                number + 1,
                record.shot_type.as_str(),
                record.target.get(),
                format_value(record.total),
                format_value(record.side),
            )?;
        }
        if review.shots.is_empty()
            || !self.confirm(&format!("Remove any shots from {}?", review.club), false)?
        {
            writeln!(self.output, "Keeping all shots")?;
            return Ok(Vec::new());
        }
        let count = review.shots.len();
        let picked = self.ask_until(
            "Shots to REMOVE (numbers or ranges, e.g. 1 3 5-7; empty for none):",
            |answer| parse_selection(answer, count),
        )?;
        if picked.is_empty() {
            writeln!(self.output, "No shots removed")?;
        } else {
            writeln!(self.output, "Marked {} shot(s) for removal", picked.len())?;
        }
        Ok(picked.into_iter().map(|index| review.shots[index].0).collect())
    }
}

impl<R: BufRead, W: Write> Operator for LinePrompt<R, W> {
    fn target_distance(
        &mut self,
        club: ClubId,
        shots: usize,
        default: TargetDistance,
        unit: Unit,
    ) -> io::Result<TargetDistance> {
        let question = format!("{club} ({shots} shots) - Target distance ({unit}) [{default}]:");
        self.ask_until(&question, |answer| parse_target(answer, default))
    }

    fn shot_type(&mut self, club: ClubId, shots: usize, default: ShotType) -> io::Result<ShotType> {
        let question = format!("{club} ({shots} shots) - Shot type, tee or approach [{default}]:");
        self.ask_until(&question, |answer| {
            if answer.is_empty() {
                return Ok(default);
            }
            answer
                .parse::<ShotType>()
                .map_err(|_| format!("'{answer}' is not a shot type; answer tee or approach."))
        })
    }

    fn confirm_export(&mut self, shots: usize) -> io::Result<bool> {
        self.confirm(&format!("Export {shots} shots to CSV file?"), true)
    }
}

/// `y`/`yes`/`n`/`no` in any case; an empty answer takes `default`.
pub fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Parses a target distance answer; an empty answer keeps `default`.
pub fn parse_target(answer: &str, default: TargetDistance) -> Result<TargetDistance, String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    let value: u32 = answer
        .parse()
        .map_err(|_| format!("'{answer}' is not a whole number."))?;
    TargetDistance::new(value).map_err(|error| error.to_string())
}

/// Parses 1-based shot numbers such as `1 3, 5-7` into sorted, distinct
/// 0-based indices below `count`.
pub fn parse_selection(answer: &str, count: usize) -> Result<Vec<usize>, String> {
    let mut picked = Vec::new();
    for token in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (parse_shot_number(start)?, parse_shot_number(end)?),
            None => {
                let number = parse_shot_number(token)?;
                (number, number)
            }
        };
        if start > end {
            return Err(format!("range '{token}' is reversed."));
        }
        if end > count {
            return Err(format!("there is no shot #{end}; pick 1 to {count}."));
        }
        picked.extend(start - 1..end);
    }
    picked.sort_unstable();
    picked.dedup();
    Ok(picked)
}

fn parse_shot_number(token: &str) -> Result<usize, String> {
    match token.trim().parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => Err(format!("'{token}' is not a shot number.")),
    }
}
