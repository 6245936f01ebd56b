//! Per-run points formulas.
//!
//! The engine never computes points itself; it asks a [`RunScorer`]. The
//! table-driven [`StandardScorer`] covers the scoring kinds recorded on runs
//! (by time, by points, by opening/closing points, pass/fail).

use agility_model::{Run, RunScoring, ScoringMethod, ScoringStyle};

/// Title points earned by a run and whether it counts as a clean Q.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TitlePoints {
    pub points: f64,
    pub clean: bool,
}

/// Computes points for a run under the scoring method that governs it.
///
/// Callers only ask about runs that qualified for title, lifetime and
/// placement points; speed points check qualification themselves.
pub trait RunScorer {
    fn title_points(&self, method: &ScoringMethod, run: &Run) -> TitlePoints;

    fn lifetime_points(&self, method: &ScoringMethod, run: &Run) -> f64;

    fn placement_points(&self, method: &ScoringMethod, run: &Run) -> f64;

    fn speed_points(&self, method: &ScoringMethod, run: &Run) -> u32;
}

impl<T: RunScorer + ?Sized> RunScorer for &T {
    fn title_points(&self, method: &ScoringMethod, run: &Run) -> TitlePoints {
        (**self).title_points(method, run)
    }

    fn lifetime_points(&self, method: &ScoringMethod, run: &Run) -> f64 {
        (**self).lifetime_points(method, run)
    }

    fn placement_points(&self, method: &ScoringMethod, run: &Run) -> f64 {
        (**self).placement_points(method, run)
    }

    fn speed_points(&self, method: &ScoringMethod, run: &Run) -> u32 {
        (**self).speed_points(method, run)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

/// Fault score used to index the points tables, or `None` when the run
/// earns nothing from the tables.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TableScore {
    score: Option<f64>,
    clean: bool,
}

impl StandardScorer {
    /// Time faults for the run's scoring inputs.
    ///
    /// Time-scored runs accrue faults over standard course time unless the
    /// method turns that off; points-scored runs only accrue them when the
    /// method asks for over or under faults.
    pub fn time_faults(method: &ScoringMethod, scoring: &RunScoring) -> f64 {
        let (time, sct, by_time) = match *scoring {
            RunScoring::ByTime { time, sct, .. } => (time, sct, true),
            RunScoring::ByPoints { time, sct, .. } | RunScoring::ByOpenClose { time, sct, .. } => {
                (time, sct, false)
            }
            RunScoring::PassFail => return 0.0,
        };
        if sct <= 0.0 {
            return 0.0;
        }
        let over = method.time_faults_over;
        let under = !by_time && method.time_faults_under;
        let mut faults = 0.0;
        if over && time > sct {
            faults += (time - sct) * method.time_fault_multiplier;
        }
        if under && time > 0.0 && time < sct {
            faults += (sct - time) * method.time_fault_multiplier;
        }
        faults
    }

    fn table_score(method: &ScoringMethod, run: &Run) -> TableScore {
        match run.scoring {
            RunScoring::ByTime {
                course_faults,
                time,
                sct,
            } => {
                let mut score = course_faults + Self::time_faults(method, &run.scoring);
                let clean = score.abs() < f64::EPSILON;
                if method.style == ScoringStyle::TimePlusFaults {
                    if method.qs_must_be_clean && score > 0.0 {
                        return TableScore { score: None, clean };
                    }
                    if sct > 0.0 {
                        score = (score + time - sct).max(0.0);
                    }
                }
                TableScore {
                    score: Some(score),
                    clean,
                }
            }
            RunScoring::ByPoints { need_open, open, .. } => {
                if open >= need_open {
                    TableScore {
                        score: Some(Self::time_faults(method, &run.scoring)),
                        clean: true,
                    }
                } else {
                    TableScore {
                        score: None,
                        clean: false,
                    }
                }
            }
            RunScoring::ByOpenClose {
                need_open,
                need_close,
                open,
                close,
                ..
            } => {
                let earned = (open >= need_open && close >= need_close)
                    || (need_close == 0.0 && open + close >= need_open);
                if earned {
                    TableScore {
                        score: Some(Self::time_faults(method, &run.scoring)),
                        clean: true,
                    }
                } else {
                    TableScore {
                        score: None,
                        clean: false,
                    }
                }
            }
            RunScoring::PassFail => TableScore {
                score: run.q.is_qualified().then_some(0.0),
                clean: false,
            },
        }
    }

    fn bonus(method: &ScoringMethod, run: &Run) -> f64 {
        if method.has_bonus_points {
            run.bonus_points
        } else {
            0.0
        }
    }
}

impl RunScorer for StandardScorer {
    fn title_points(&self, method: &ScoringMethod, run: &Run) -> TitlePoints {
        let table = Self::table_score(method, run);
        let points = table
            .score
            .map_or(0.0, |score| method.title_points_for(score) + Self::bonus(method, run));
        TitlePoints {
            points,
            clean: table.clean,
        }
    }

    fn lifetime_points(&self, method: &ScoringMethod, run: &Run) -> f64 {
        let Some(score) = Self::table_score(method, run).score else {
            return 0.0;
        };
        let speed = self.speed_points(method, run);
        method.lifetime_points_for(score, speed) + Self::bonus(method, run)
    }

    fn placement_points(&self, method: &ScoringMethod, run: &Run) -> f64 {
        if run.place == 0 {
            return 0.0;
        }
        method.placement_points_for(run.place)
    }

    /// Whole seconds under standard course time, scaled by the placement
    /// multiplier when the run placed.
    fn speed_points(&self, method: &ScoringMethod, run: &Run) -> u32 {
        if !method.has_speed_points || !run.q.is_qualified() {
            return 0;
        }
        let time = run.scoring.time();
        let sct = run.scoring.sct();
        if time <= 0.0 || sct <= 0.0 {
            return 0;
        }
        let mut points = (sct - time).trunc().max(0.0);
        if run.place > 0
            && let Some(multiplier) = method.speed_multiplier_for(run.place)
        {
            points = (points * multiplier).trunc();
        }
        points as u32
    }
}
