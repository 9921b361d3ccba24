use crate::paginate::page_count;
use crate::types::*;

/// Calculate page statistics for a print run
pub fn calculate_statistics(items: usize, rows: usize, cols: usize) -> SheetStatistics {
    let slots_per_page = rows * cols;
    let pages = if slots_per_page == 0 {
        0
    } else {
        page_count(items, slots_per_page)
    };

    // Only the last page can be partially filled
    let last_page_slots = match pages {
        0 => 0,
        _ => items - (pages - 1) * slots_per_page,
    };
    let empty_slots = match pages {
        0 => 0,
        _ => slots_per_page - last_page_slots,
    };

    SheetStatistics {
        items,
        slots_per_page,
        pages,
        last_page_slots,
        empty_slots,
    }
}
