//! Race results.

use std::cmp::Ordering;

use rg_core::BoatId;

use crate::{FinishStatus, RaceProgress, RaceState};

/// One line of the results table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    /// 1-based.
    pub position: usize,
    pub boat: BoatId,
    /// `None` while still racing.
    pub status: Option<FinishStatus>,
    /// Finish time including any unserved penalty.
    pub time: Option<f64>,
    pub legs_completed: u32,
    /// Distance to the next mark for boats that have not finished.
    pub distance_to_mark: Option<f64>,
    pub penalties: u32,
    pub distance_m: f64,
    pub top_speed: f64,
    pub maneuvers: u32,
}

/// Sort group: finishers, then boats racing or retired after starting,
/// then boats that never started.
fn group(progress: RaceProgress) -> u8 {
    match progress {
        RaceProgress::Finished { status: FinishStatus::Finished, .. } => 0,
        RaceProgress::Finished { status: FinishStatus::Dns, .. } | RaceProgress::Prestart => 2,
        _ => 1,
    }
}

pub(crate) fn rank(states: &[RaceState]) -> Vec<Standing> {
    let mut order: Vec<usize> = (0..states.len()).collect();
    order.sort_by(|&a, &b| {
        let (sa, sb) = (&states[a], &states[b]);
        group(sa.progress)
            .cmp(&group(sb.progress))
            .then_with(|| match (sa.progress, sb.progress) {
                (
                    RaceProgress::Finished { time: ta, status: FinishStatus::Finished },
                    RaceProgress::Finished { time: tb, status: FinishStatus::Finished },
                ) => ta.partial_cmp(&tb).unwrap_or(Ordering::Equal),
                _ => sb
                    .legs_completed()
                    .cmp(&sa.legs_completed())
                    .then_with(|| sa.distance_to_mark.partial_cmp(&sb.distance_to_mark).unwrap_or(Ordering::Equal)),
            })
            .then(a.cmp(&b))
    });

    order
        .into_iter()
        .enumerate()
        .map(|(rank, i)| {
            let st = &states[i];
            Standing {
                position: rank + 1,
                boat: BoatId(i as u16),
                status: st.progress.status(),
                time: match st.progress {
                    RaceProgress::Finished { time, status: FinishStatus::Finished } => Some(time),
                    _ => None,
                },
                legs_completed: st.legs_completed(),
                distance_to_mark: match st.progress {
                    RaceProgress::Finished { status: FinishStatus::Finished, .. } => None,
                    _ => Some(st.distance_to_mark),
                },
                penalties: st.penalty.total,
                distance_m: st.total_distance_m(),
                top_speed: st.top_speed(),
                maneuvers: st.maneuvers(),
            }
        })
        .collect()
}
