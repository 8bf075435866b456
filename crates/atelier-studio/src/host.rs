use atelier_engine::core::{App, AppControl, FrameCtx};
use atelier_engine::input::Key;
use atelier_scenes::{Scene, SceneConfig, SceneKind};

const SWITCH_KEYS: [(Key, SceneKind); 5] = [
    (Key::F1, SceneKind::Landscape),
    (Key::F2, SceneKind::Shading),
    (Key::F3, SceneKind::Environment),
    (Key::F4, SceneKind::Shadows),
    (Key::F5, SceneKind::Raytrace),
];

/// Hosts the exercises in one window. A scene is built the first time it is
/// shown and kept, with its state, when another one is selected.
pub struct SceneHost {
    config: SceneConfig,
    scenes: Vec<Option<Box<dyn Scene>>>,
    active: SceneKind,
    title_dirty: bool,
}

impl SceneHost {
    pub fn new(config: SceneConfig, initial: SceneKind) -> Self {
        Self {
            config,
            scenes: SceneKind::ALL.iter().map(|_| None).collect(),
            active: initial,
            title_dirty: true,
        }
    }

    pub fn active(&self) -> SceneKind {
        self.active
    }

    pub fn is_built(&self, kind: SceneKind) -> bool {
        self.scenes[kind.index()].is_some()
    }

    /// Makes `kind` current. Returns whether it changed.
    pub fn select(&mut self, kind: SceneKind) -> bool {
        if kind == self.active {
            return false;
        }
        log::info!("switching scene: {} -> {}", self.active, kind);
        self.active = kind;
        self.title_dirty = true;
        true
    }

    pub fn title(&self) -> String {
        format!("atelier: {} (F1-F5 switch, Esc quits)", self.active)
    }

    fn scene_mut(&mut self) -> &mut Box<dyn Scene> {
        let (kind, config) = (self.active, &self.config);
        self.scenes[kind.index()].get_or_insert_with(|| {
            log::debug!("building scene {kind}");
            kind.build(config)
        })
    }
}

impl App for SceneHost {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed; exiting");
            return AppControl::Exit;
        }
        if let Some((_, kind)) = SWITCH_KEYS.iter().find(|(key, _)| ctx.input_frame.key_pressed(*key)) {
            self.select(*kind);
        }
        if self.title_dirty {
            ctx.window.set_title(&self.title());
            self.title_dirty = false;
        }

        let viewport = ctx.window.viewport();
        let scene = self.scene_mut();
        scene.input(ctx.input, ctx.input_frame, viewport);
        scene.update(ctx.time);

        let clear = scene.clear_color();
        match ctx.render(clear, |rctx, target| scene.render(rctx, target)) {
            Ok(control) => control,
            Err(e) => {
                log::error!("{} failed to render: {e:#}", scene.name());
                AppControl::Exit
            }
        }
    }
}
