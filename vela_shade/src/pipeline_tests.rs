//! Unit tests for fragment pipeline linking
//!
//! Covers successful links of the passthrough stage plus the rejection
//! matrix for broken contracts.

use std::sync::Arc;

use glam::Vec4;

use crate::error::Error;
use crate::mock::MockStage;
use crate::pipeline::{FragmentPipeline, FragmentPipelineDesc};
use crate::stage::fragment::{FragmentStage, PassthroughFragmentStage};
use crate::stage::interface::{
    AttributeFormat, InputAttribute, Interpolation, OutputAttribute, ShaderStage, StageInterface,
};

fn color_output(location: u32) -> OutputAttribute {
    OutputAttribute {
        location,
        format: AttributeFormat::R32G32B32A32_SFLOAT,
    }
}

fn mock_stage(interface: StageInterface) -> Arc<dyn FragmentStage> {
    Arc::new(MockStage::new(interface, Vec4::ONE))
}

// ============================================================================
// SUCCESSFUL LINK TESTS
// ============================================================================

#[test]
fn test_link_passthrough_stage() {
    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![color_output(0)],
        stage: Arc::new(PassthroughFragmentStage::new()),
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    let pipeline = FragmentPipeline::link(desc).unwrap();
    assert_eq!(pipeline.upstream_outputs().len(), 1);
    assert_eq!(
        pipeline.color_target_format(),
        AttributeFormat::R32G32B32A32_SFLOAT
    );
    assert_eq!(pipeline.stage().interface().bindings.len(), 1);
}

#[test]
fn test_link_with_extra_upstream_outputs() {
    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![color_output(0), color_output(1), color_output(5)],
        stage: Arc::new(PassthroughFragmentStage::new()),
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    assert!(FragmentPipeline::link(desc).is_ok());
}

#[test]
fn test_link_stage_without_inputs_or_outputs() {
    let stage = mock_stage(StageInterface {
        stage: ShaderStage::Fragment,
        inputs: vec![],
        outputs: vec![],
        bindings: vec![],
    });

    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![],
        stage,
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    assert!(FragmentPipeline::link(desc).is_ok());
}

// ============================================================================
// REJECTION TESTS
// ============================================================================

#[test]
fn test_link_rejects_missing_upstream_output() {
    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![],
        stage: Arc::new(PassthroughFragmentStage::new()),
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    let result = FragmentPipeline::link(desc);
    assert!(matches!(result, Err(Error::InterfaceMismatch(_))));
}

#[test]
fn test_link_rejects_upstream_format_mismatch() {
    let narrow = OutputAttribute {
        location: 0,
        format: AttributeFormat::R32G32_SFLOAT,
    };

    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![narrow],
        stage: Arc::new(PassthroughFragmentStage::new()),
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    let result = FragmentPipeline::link(desc);
    assert!(matches!(result, Err(Error::InterfaceMismatch(_))));
}

#[test]
fn test_link_rejects_target_format_mismatch() {
    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![color_output(0)],
        stage: Arc::new(PassthroughFragmentStage::new()),
        color_target_format: AttributeFormat::R32G32_SFLOAT,
    };

    let result = FragmentPipeline::link(desc);
    assert!(matches!(result, Err(Error::InterfaceMismatch(_))));
}

#[test]
fn test_link_rejects_output_beyond_target_zero() {
    let stage = mock_stage(StageInterface {
        stage: ShaderStage::Fragment,
        inputs: vec![],
        outputs: vec![color_output(1)],
        bindings: vec![],
    });

    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![],
        stage,
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    let result = FragmentPipeline::link(desc);
    assert!(matches!(result, Err(Error::InterfaceMismatch(_))));
}

#[test]
fn test_link_rejects_self_inconsistent_interface() {
    let duplicate_input = InputAttribute {
        location: 0,
        format: AttributeFormat::R32G32B32A32_SFLOAT,
        interpolation: Interpolation::Perspective,
    };

    let stage = mock_stage(StageInterface {
        stage: ShaderStage::Fragment,
        inputs: vec![duplicate_input, duplicate_input],
        outputs: vec![],
        bindings: vec![],
    });

    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![color_output(0)],
        stage,
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    let result = FragmentPipeline::link(desc);
    assert!(matches!(result, Err(Error::InterfaceMismatch(_))));
}

#[test]
fn test_link_error_message_names_the_location() {
    let desc = FragmentPipelineDesc {
        upstream_outputs: vec![color_output(3)],
        stage: Arc::new(PassthroughFragmentStage::new()),
        color_target_format: AttributeFormat::R32G32B32A32_SFLOAT,
    };

    match FragmentPipeline::link(desc) {
        Err(Error::InterfaceMismatch(msg)) => {
            assert!(msg.contains("location 0"));
        }
        other => panic!("expected InterfaceMismatch, got {:?}", other.err().map(|e| format!("{}", e))),
    }
}
