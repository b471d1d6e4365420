// src/pagination.rs
// =============================================================================
// Builds the list of listing requests needed to cover a collection.
//
// The store's collection endpoint is paged with two form fields:
//   start = offset of the first item
//   num   = number of items in this page
//
// We don't discover the listing size dynamically. The caller gives us an
// estimate (540 by default) and we slice [0, estimate) into pages.
// =============================================================================

use serde::Serialize;

use crate::error::{Result, ScrapeError};

/// One page of the listing, sent as the POST form body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    #[serde(rename = "start")]
    pub offset: usize,
    #[serde(rename = "num")]
    pub count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Fails when `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(ScrapeError::Configuration(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Paginator { page_size })
    }

    // Example (page_size = 120):
    //   plan(540) -> [0/120, 120/120, 240/120, 360/120, 480/60]
    pub fn plan(&self, total_estimate: usize) -> Vec<PageRequest> {
        (0..total_estimate)
            .step_by(self.page_size)
            .map(|offset| PageRequest {
                offset,
                count: self.page_size.min(total_estimate - offset),
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does step_by do?
//    - (0..540).step_by(120) yields 0, 120, 240, 360, 480
//    - Each value is the offset of one page
//
// 2. Why min() for the count?
//    - The last page only gets what's left: 540 - 480 = 60
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listing_plan() {
        let plan = Paginator::new(120).unwrap().plan(540);
        let pairs: Vec<_> = plan.iter().map(|r| (r.offset, r.count)).collect();
        assert_eq!(
            pairs,
            vec![(0, 120), (120, 120), (240, 120), (360, 120), (480, 60)]
        );
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let plan = Paginator::new(10).unwrap().plan(30);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.last().unwrap().count, 10);
    }

    #[test]
    fn test_zero_total_is_empty() {
        assert!(Paginator::new(5).unwrap().plan(0).is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = Paginator::new(0).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_coverage_is_contiguous() {
        for page_size in 1..=13 {
            let paginator = Paginator::new(page_size).unwrap();
            for total in 0..=100 {
                let plan = paginator.plan(total);
                let mut next = 0;
                for request in &plan {
                    assert_eq!(request.offset, next);
                    assert!(request.count > 0 && request.count <= page_size);
                    next += request.count;
                }
                assert_eq!(next, total);
            }
        }
    }

    #[test]
    fn test_form_field_names() {
        let body = serde_json::to_value(PageRequest { offset: 240, count: 120 }).unwrap();
        assert_eq!(body, serde_json::json!({ "start": 240, "num": 120 }));
    }
}
