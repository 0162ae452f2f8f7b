use tokio::sync::Mutex;

use crate::presentation::PoiMarker;

/// Identifies one search. Later searches get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Board {
    issued: u64,
    rendered: u64,
    markers: Vec<PoiMarker>,
}

/// The set of POI markers currently shown. Searches may finish in any
/// order; a result never replaces one of a newer search.
#[derive(Debug, Default)]
pub struct ResultBoard {
    board: Mutex<Board>,
}

impl ResultBoard {
    /// Clears the displayed markers and starts a new search.
    pub async fn begin(&self) -> Ticket {
        let mut board = self.board.lock().await;
        board.issued += 1;
        board.markers.clear();
        Ticket(board.issued)
    }

    /// Shows `markers` unless a newer search already published. Returns
    /// whether the markers are displayed now.
    pub async fn publish(&self, ticket: Ticket, markers: Vec<PoiMarker>) -> bool {
        let mut board = self.board.lock().await;
        if ticket.0 < board.rendered {
            log::debug!(
                "dropping stale results of search {} (showing {})",
                ticket.0,
                board.rendered
            );
            return false;
        }
        board.rendered = ticket.0;
        board.markers = markers;
        true
    }

    /// Records that the search of `ticket` ended without markers, so older
    /// searches can no longer show theirs.
    pub async fn settle(&self, ticket: Ticket) {
        let mut board = self.board.lock().await;
        if ticket.0 >= board.rendered {
            board.rendered = ticket.0;
            board.markers.clear();
        }
    }

    /// Empties the board and invalidates every search still running.
    pub async fn clear(&self) {
        let mut board = self.board.lock().await;
        board.issued += 1;
        board.rendered = board.issued;
        board.markers.clear();
    }

    pub async fn markers(&self) -> Vec<PoiMarker> {
        self.board.lock().await.markers.clone()
    }
}
