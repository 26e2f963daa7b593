use image::RgbaImage;
use ndarray::Array2;

use crate::config::ViewerSettings;
use crate::edit::{GestureState, SegmentationStore, ToolKind, ToolParams, tool_mask};
use crate::metrics::{MetricsReport, compare_labels};
use crate::model::{CaseVolumes, IntensityVolume, LabelVolume, Pixel, VolumeMetadata};
use crate::render::{Compositor, Overlay, PreviewLayer, present};
use crate::slice::{IntensityWindow, Normalizer, Rotation, oriented_shape, oriented_slice};
use crate::viewport::{SizePolicy, ViewState, ViewportFrame, ZoomStep, compute_frame};

use super::{
    Capabilities, DisplayMode, KeyCommand, PanelContent, PointerEvent, PointerGesture, Result,
    capabilities,
};

const MAX_PANELS: usize = 2;

/// Which label layers are drawn. Hiding a layer never touches the cached base slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayToggles {
    pub prediction: bool,
    pub reference: bool,
    pub edit: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            prediction: true,
            reference: true,
            edit: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPanel {
    pub content: PanelContent,
    pub image: RgbaImage,
    pub frame: ViewportFrame,
}

/// Everything the persistence collaborator needs to write the edited labels.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub labels: LabelVolume,
    pub metadata: VolumeMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Pan { last: (f32, f32) },
    Window { origin: (f32, f32), start: IntensityWindow },
    Paint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BaseKey {
    slice_index: usize,
    rotation: Rotation,
    window: IntensityWindow,
    gamma: f32,
}

#[derive(Debug, Clone)]
struct BaseCache {
    key: BaseKey,
    pixels: Array2<u8>,
}

/// One open case together with all view and editing state. Owns the editable labels
/// through its [`SegmentationStore`].
#[derive(Debug)]
pub struct Session {
    settings: ViewerSettings,
    case: CaseVolumes,
    default_window: IntensityWindow,
    normalizer: Normalizer,
    view: ViewState,
    rotation: Rotation,
    slice_index: usize,
    mode: DisplayMode,
    overlays: OverlayToggles,
    tools: ToolParams,
    store: SegmentationStore,
    hover: Option<Pixel>,
    drag: DragState,
    frames: [Option<ViewportFrame>; MAX_PANELS],
    base: Option<BaseCache>,
}

impl Session {
    pub fn open(case: CaseVolumes, settings: ViewerSettings) -> Result<Self> {
        settings.validate()?;
        let window = IntensityWindow::from_volume(case.image(), &settings.normalization);
        let mut normalizer = Normalizer::new(window);
        normalizer.set_gamma(settings.gamma);
        let store = SegmentationStore::with_capacity(editable_seed(&case)?, settings.undo_depth);
        let slice_index = case.depth() / 2;
        log::info!(
            "opened case {:?} at slice {slice_index}, window [{}, {}]",
            case.image().shape(),
            window.low(),
            window.high()
        );
        Ok(Self {
            tools: settings.tools,
            settings,
            case,
            default_window: window,
            normalizer,
            view: ViewState::new(),
            rotation: Rotation::NONE,
            slice_index,
            mode: DisplayMode::default(),
            overlays: OverlayToggles::default(),
            store,
            hover: None,
            drag: DragState::Idle,
            frames: [None; MAX_PANELS],
            base: None,
        })
    }

    /// Replace the open case. View and undo history start fresh; rotation, gamma and tool
    /// choices carry over.
    pub fn switch_case(&mut self, case: CaseVolumes) -> Result<()> {
        let window = IntensityWindow::from_volume(case.image(), &self.settings.normalization);
        self.store.reset(editable_seed(&case)?);
        self.slice_index = case.depth() / 2;
        self.case = case;
        self.default_window = window;
        self.normalizer.set_window(window);
        self.view.reset();
        self.hover = None;
        self.drag = DragState::Idle;
        self.frames = [None; MAX_PANELS];
        self.base = None;

        if !self.capabilities().allows(self.mode) {
            log::info!(
                "display mode {:?} unavailable for the new case; showing prediction",
                self.mode
            );
            self.mode = DisplayMode::Prediction;
        }
        log::info!(
            "switched to case {:?}, window [{}, {}]",
            self.case.image().shape(),
            window.low(),
            window.high()
        );
        Ok(())
    }

    pub fn case(&self) -> &CaseVolumes {
        &self.case
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn capabilities(&self) -> Capabilities {
        capabilities(&self.case)
    }

    pub fn store(&self) -> &SegmentationStore {
        &self.store
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn tools(&self) -> &ToolParams {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolParams {
        &mut self.tools
    }

    pub fn overlays(&self) -> OverlayToggles {
        self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayToggles {
        &mut self.overlays
    }

    pub fn hover(&self) -> Option<Pixel> {
        self.hover
    }

    /// `(rows, columns)` of every slice under the current rotation.
    pub fn slice_shape(&self) -> (usize, usize) {
        oriented_shape(self.case.image().shape(), self.rotation)
    }

    /// Out-of-range indices are ignored.
    pub fn set_slice(&mut self, index: usize) -> bool {
        if index >= self.case.depth() || index == self.slice_index {
            return false;
        }
        self.finish_paint();
        self.slice_index = index;
        self.hover = None;
        true
    }

    pub fn step_slice(&mut self, delta: i32) -> bool {
        match self.slice_index.checked_add_signed(delta as isize) {
            Some(index) => self.set_slice(index),
            None => false,
        }
    }

    pub fn zoom(&mut self, step: ZoomStep) {
        self.view.zoom_step(step, self.settings.zoom_step);
        let (rows, cols) = self.slice_shape();
        self.view.field_of_view(cols, rows);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.view.set_zoom(zoom);
        let (rows, cols) = self.slice_shape();
        self.view.field_of_view(cols, rows);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    pub fn rotate(&mut self, clockwise: bool) {
        self.rotation = if clockwise {
            self.rotation.clockwise()
        } else {
            self.rotation.counter_clockwise()
        };
        self.finish_paint();
        self.hover = None;
        self.frames = [None; MAX_PANELS];
        log::debug!("rotation set to {} quarter turns", self.rotation.quarter_turns());
    }

    pub fn set_gamma(&mut self, gamma: f32) -> bool {
        self.normalizer.set_gamma(gamma)
    }

    pub fn set_window(&mut self, window: IntensityWindow) {
        self.normalizer.set_window(window);
    }

    /// Back to the window computed when the case was opened.
    pub fn reset_window(&mut self) {
        self.normalizer.set_window(self.default_window);
    }

    /// Refused when the open case lacks the data `mode` needs.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> bool {
        if !self.capabilities().allows(mode) {
            return false;
        }
        if self.mode == DisplayMode::Edit && mode != DisplayMode::Edit {
            self.finish_paint();
            self.hover = None;
        }
        if self.mode != mode {
            self.frames = [None; MAX_PANELS];
        }
        self.mode = mode;
        true
    }

    pub fn panels(&self) -> &'static [PanelContent] {
        self.mode.panels()
    }

    /// Returns whether the displayed panels need to be redrawn. Events on a panel that has
    /// not been rendered yet, or that map outside the slice, are ignored. A release always
    /// ends the current drag.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<bool> {
        if event.gesture == PointerGesture::Up {
            self.finish_paint();
            self.drag = DragState::Idle;
            return Ok(false);
        }
        let Some(frame) = self.frames.get(event.panel).copied().flatten() else {
            return Ok(false);
        };
        let editing = self.mode == DisplayMode::Edit
            && !event.modifiers.shift
            && !matches!(self.drag, DragState::Pan { .. } | DragState::Window { .. });
        if editing {
            self.edit_pointer(event, &frame)
        } else {
            Ok(self.navigate_pointer(event, &frame))
        }
    }

    fn edit_pointer(&mut self, event: PointerEvent, frame: &ViewportFrame) -> Result<bool> {
        let pixel = frame.display_to_pixel(event.x, event.y);
        match event.gesture {
            PointerGesture::Down => {
                let Some(pixel) = pixel else {
                    return Ok(false);
                };
                self.store.begin_gesture(self.slice_index)?;
                self.drag = DragState::Paint;
                self.hover = Some(pixel);
                log::debug!("edit gesture started on slice {}", self.slice_index);
                self.apply_tool_at(pixel)?;
                Ok(true)
            }
            PointerGesture::Move => {
                let moved = self.hover != pixel;
                self.hover = pixel;
                match pixel {
                    Some(pixel)
                        if self.drag == DragState::Paint
                            && self.tools.tool != ToolKind::RegionFill =>
                    {
                        self.apply_tool_at(pixel)?;
                        Ok(true)
                    }
                    _ => Ok(moved),
                }
            }
            PointerGesture::Up => Ok(false),
        }
    }

    fn navigate_pointer(&mut self, event: PointerEvent, frame: &ViewportFrame) -> bool {
        let point = (event.x, event.y);
        match (event.gesture, self.drag) {
            (PointerGesture::Down, _) => {
                self.drag = if event.modifiers.ctrl {
                    DragState::Window {
                        origin: point,
                        start: self.normalizer.window(),
                    }
                } else {
                    DragState::Pan { last: point }
                };
                false
            }
            (PointerGesture::Move, DragState::Pan { last }) => {
                let delta = (point.0 - last.0, point.1 - last.1);
                self.view.pan_by(
                    delta,
                    frame.display,
                    frame.source_width,
                    frame.source_height,
                );
                self.drag = DragState::Pan { last: point };
                true
            }
            (PointerGesture::Move, DragState::Window { origin, start }) => {
                self.normalizer
                    .set_window(start.dragged(point.0 - origin.0, point.1 - origin.1));
                true
            }
            (PointerGesture::Move, _) => {
                if self.mode == DisplayMode::Edit {
                    let pixel = frame.display_to_pixel(event.x, event.y);
                    let moved = self.hover != pixel;
                    self.hover = pixel;
                    moved
                } else {
                    false
                }
            }
            (PointerGesture::Up, _) => false,
        }
    }

    fn apply_tool_at(&mut self, pixel: Pixel) -> Result<usize> {
        let intensity = oriented_slice(&self.case.image().data, self.slice_index, self.rotation)?;
        let changed = self.store.apply_tool(
            &self.tools,
            intensity,
            self.slice_index,
            self.rotation,
            pixel,
        )?;
        Ok(changed)
    }

    fn finish_paint(&mut self) {
        if self.drag == DragState::Paint {
            self.drag = DragState::Idle;
        }
        if matches!(self.store.gesture(), GestureState::Drawing { .. }) {
            self.store.end_gesture();
            log::debug!("edit gesture finished");
        }
    }

    /// Returns whether the displayed panels need to be redrawn.
    pub fn handle_key(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Undo => self.undo(),
            KeyCommand::RotateClockwise => {
                self.rotate(true);
                true
            }
            KeyCommand::RotateCounterClockwise => {
                self.rotate(false);
                true
            }
            KeyCommand::ZoomIn => {
                self.zoom(ZoomStep::In);
                true
            }
            KeyCommand::ZoomOut => {
                self.zoom(ZoomStep::Out);
                true
            }
            KeyCommand::ResetView => {
                self.reset_view();
                true
            }
            KeyCommand::NextSlice => self.step_slice(1),
            KeyCommand::PreviousSlice => self.step_slice(-1),
            KeyCommand::SelectTool(tool) => {
                self.tools.tool = tool;
                self.mode == DisplayMode::Edit
            }
            KeyCommand::SelectLabel(label) => {
                self.tools.active_label = label;
                self.mode == DisplayMode::Edit
            }
        }
    }

    /// Undo the latest edit on whichever slice it touched. Returns whether that slice is
    /// the one on screen.
    pub fn undo(&mut self) -> bool {
        if self.drag == DragState::Paint {
            self.drag = DragState::Idle;
        }
        match self.store.undo() {
            Some(index) => {
                log::info!("undid edit on slice {index}");
                index == self.slice_index
            }
            None => false,
        }
    }

    /// Pixels the tool would touch at the hovered position.
    pub fn preview_mask(&self) -> Result<Option<Array2<bool>>> {
        let Some(hover) = self.hover.filter(|_| self.mode == DisplayMode::Edit) else {
            return Ok(None);
        };
        let intensity = oriented_slice(&self.case.image().data, self.slice_index, self.rotation)?;
        Ok(Some(tool_mask(&self.tools, intensity, hover)))
    }

    /// Render panel `panel` of the current mode. `None` when the panel does not exist or
    /// its data is missing from the case.
    pub fn render_panel(&mut self, panel: usize, policy: SizePolicy) -> Result<Option<RenderedPanel>> {
        let Some(&content) = self.panels().get(panel) else {
            return Ok(None);
        };
        let preview = match content {
            PanelContent::Edit => self.preview_mask()?,
            _ => None,
        };
        let key = BaseKey {
            slice_index: self.slice_index,
            rotation: self.rotation,
            window: self.normalizer.window(),
            gamma: self.normalizer.gamma(),
        };
        let base = refresh_base(&mut self.base, self.case.image(), &self.normalizer, key)?;
        let (rows, cols) = base.dim();

        let prediction = self
            .case
            .prediction()
            .map(|labels| oriented_slice(&labels.data, key.slice_index, key.rotation))
            .transpose()?;
        let reference = self
            .case
            .reference()
            .map(|labels| oriented_slice(&labels.data, key.slice_index, key.rotation))
            .transpose()?;

        let overlay = match content {
            PanelContent::Prediction => match prediction {
                Some(labels) if self.overlays.prediction => Overlay::Labels(labels),
                _ => Overlay::None,
            },
            PanelContent::Reference => match reference {
                Some(labels) if self.overlays.reference => Overlay::Labels(labels),
                Some(_) => Overlay::None,
                None => return Ok(None),
            },
            PanelContent::Diff => match (prediction, reference) {
                (Some(prediction), Some(reference)) => Overlay::Diff {
                    prediction,
                    reference,
                },
                _ => return Ok(None),
            },
            PanelContent::Edit if self.overlays.edit => {
                Overlay::Labels(self.store.slice(key.slice_index, key.rotation)?)
            }
            PanelContent::Edit => Overlay::None,
        };

        let palette = &self.settings.palette;
        let preview_color = if self.tools.is_erasing() {
            palette.erase_preview()
        } else {
            palette.preview(self.tools.active_label)
        };
        let preview_layer = preview.as_ref().map(|mask| PreviewLayer {
            mask: mask.view(),
            color: preview_color,
        });
        let raster = Compositor::new(palette).compose(
            base.view(),
            &overlay,
            preview_layer.as_ref(),
        )?;

        let frame = compute_frame(&mut self.view, (cols, rows), policy);
        if let Some(slot) = self.frames.get_mut(panel) {
            *slot = Some(frame);
        }
        Ok(Some(RenderedPanel {
            content,
            image: present(&raster, &frame),
            frame,
        }))
    }

    /// Render every panel of the current mode with the configured size policy.
    pub fn render(&mut self) -> Result<Vec<Option<RenderedPanel>>> {
        let count = self.panels().len();
        let policy = self.settings.size_policy(count, None);
        (0..count)
            .map(|panel| self.render_panel(panel, policy))
            .collect()
    }

    /// Prediction against reference, when both exist.
    pub fn metrics(&self) -> Result<Option<MetricsReport>> {
        match (self.case.prediction(), self.case.reference()) {
            (Some(prediction), Some(reference)) => Ok(Some(compare_labels(prediction, reference)?)),
            _ => Ok(None),
        }
    }

    /// Edited labels against reference, when a reference exists.
    pub fn edited_metrics(&self) -> Result<Option<MetricsReport>> {
        match self.case.reference() {
            Some(reference) => Ok(Some(compare_labels(self.store.labels(), reference)?)),
            None => Ok(None),
        }
    }

    pub fn export_request(&self) -> ExportRequest {
        let labels = self.store.labels().clone();
        log::info!("export requested for labels of shape {:?}", labels.shape());
        ExportRequest {
            labels,
            metadata: self.case.image().metadata.clone(),
        }
    }
}

/// Prediction when present, otherwise an empty volume shaped like the image.
fn editable_seed(case: &CaseVolumes) -> Result<LabelVolume> {
    match case.prediction() {
        Some(prediction) => Ok(prediction.clone()),
        None => {
            let image = case.image();
            Ok(LabelVolume::zeros(image.shape(), image.metadata.clone())?)
        }
    }
}

fn refresh_base<'c>(
    cache: &'c mut Option<BaseCache>,
    image: &IntensityVolume,
    normalizer: &Normalizer,
    key: BaseKey,
) -> Result<&'c Array2<u8>> {
    let current = match cache.take() {
        Some(existing) if existing.key == key => existing,
        _ => {
            let slice = oriented_slice(&image.data, key.slice_index, key.rotation)?;
            BaseCache {
                key,
                pixels: normalizer.normalize_slice(slice),
            }
        }
    };
    Ok(&cache.insert(current).pixels)
}
