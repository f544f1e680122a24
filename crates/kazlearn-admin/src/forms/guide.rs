//! 指南条目编辑校验

use kazlearn_shared::dto::UpdateGuideWordRequest;
use validator::Validate;

use super::validation::FieldErrors;
use crate::error::Result;

/// 指南条目表单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct GuideMappingForm {
    #[validate(range(min = 1, code = "order_range", message = "order must be 1 or greater"))]
    pub order_in_guide: i32,
    #[validate(range(min = 0, max = 10, code = "importance_range", message = "importance must be 0-10"))]
    pub importance_score: i32,
}

impl GuideMappingForm {
    pub fn check(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        }
    }

    /// 校验通过后的请求体
    pub fn request(&self) -> Result<UpdateGuideWordRequest> {
        self.check().into_result()?;
        Ok(UpdateGuideWordRequest {
            order_in_guide: Some(self.order_in_guide),
            importance_score: Some(self.importance_score),
        })
    }
}

/// 单独校验重要度（批量加入时使用）
pub fn check_importance(importance_score: i32) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if !(0..=10).contains(&importance_score) {
        errors.insert("importance_score", "importance_range");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        let ok = GuideMappingForm {
            order_in_guide: 1,
            importance_score: 10,
        };
        assert!(ok.check().is_empty());

        let bad = GuideMappingForm {
            order_in_guide: 0,
            importance_score: 11,
        };
        let errors = bad.check();
        assert_eq!(errors.get("order_in_guide").unwrap().code, "order_range");
        assert_eq!(errors.get("importance_score").unwrap().code, "importance_range");
        assert!(bad.request().is_err());
    }

    #[test]
    fn test_check_importance() {
        assert!(check_importance(0).is_empty());
        assert!(check_importance(-1).contains("importance_score"));
    }
}
