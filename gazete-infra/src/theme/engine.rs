use gazete_domain::theme::{ResolvedTheme, ThemeMode};

/// 主题状态机
///
/// 生命周期：init（读取持久偏好）→ resolve（结合系统偏好得出具体
/// 亮/暗）→ update（显式切换或系统偏好变化）。状态显式注入，
/// 不依赖任何全局环境。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    /// 持久偏好 → 站点默认 → system
    pub fn init(saved: Option<ThemeMode>, site_default: Option<ThemeMode>) -> Self {
        Self {
            mode: saved.or(site_default).unwrap_or(ThemeMode::System),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// system跟随注入的系统偏好，其余直接用显式选择
    pub fn resolve(&self, system: ResolvedTheme) -> ResolvedTheme {
        match self.mode {
            ThemeMode::Light => ResolvedTheme::Light,
            ThemeMode::Dark => ResolvedTheme::Dark,
            ThemeMode::System => system,
        }
    }

    /// 翻转当前解析值并固化为显式选择
    ///
    /// 手动切换之后选择不再停留在system；返回需要持久化的新模式。
    pub fn toggle(&mut self, system: ResolvedTheme) -> ThemeMode {
        let next = self.resolve(system).flipped();
        self.mode = next.into();
        self.mode
    }

    /// 显式选择某个模式
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_fallback_chain() {
        let state = ThemeState::init(Some(ThemeMode::Dark), Some(ThemeMode::Light));
        assert_eq!(state.mode(), ThemeMode::Dark);

        let state = ThemeState::init(None, Some(ThemeMode::Light));
        assert_eq!(state.mode(), ThemeMode::Light);

        let state = ThemeState::init(None, None);
        assert_eq!(state.mode(), ThemeMode::System);
    }

    #[test]
    fn test_system_resolves_via_injected_preference() {
        let state = ThemeState::init(None, None);
        assert_eq!(state.resolve(ResolvedTheme::Dark), ResolvedTheme::Dark);
        assert_eq!(state.resolve(ResolvedTheme::Light), ResolvedTheme::Light);
    }

    #[test]
    fn test_explicit_mode_ignores_system_preference() {
        let state = ThemeState::init(Some(ThemeMode::Light), None);
        assert_eq!(state.resolve(ResolvedTheme::Dark), ResolvedTheme::Light);
    }

    #[test]
    fn test_toggle_persists_explicit_selection() {
        // system下系统为dark，解析为dark；切换后选择与解析都变为light
        let mut state = ThemeState::init(Some(ThemeMode::System), None);
        assert_eq!(state.resolve(ResolvedTheme::Dark), ResolvedTheme::Dark);

        let persisted = state.toggle(ResolvedTheme::Dark);
        assert_eq!(persisted, ThemeMode::Light);
        assert_eq!(state.mode(), ThemeMode::Light);
        assert_eq!(state.resolve(ResolvedTheme::Dark), ResolvedTheme::Light);
    }

    #[test]
    fn test_system_preference_change_keeps_selection() {
        // system模式下偏好变化只改变解析值，不改存储的选择
        let state = ThemeState::init(Some(ThemeMode::System), None);
        assert_eq!(state.resolve(ResolvedTheme::Light), ResolvedTheme::Light);
        assert_eq!(state.resolve(ResolvedTheme::Dark), ResolvedTheme::Dark);
        assert_eq!(state.mode(), ThemeMode::System);
    }
}
