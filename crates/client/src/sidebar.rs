//! Responsive navigation sidebar.
//!
//! Widths up to [`MOBILE_BREAKPOINT`] are mobile: the sidebar is off-screen
//! until toggled and an outside click hides it. Wider viewports show either
//! the full sidebar or the icons-only rail. Hover expands the rail unless
//! the user collapsed it with the toggle.

pub const MOBILE_BREAKPOINT: u32 = 768;

pub const CLASS_COLLAPSED: &str = "collapsed";
pub const CLASS_SHOW: &str = "show";
pub const CLASS_WRAPPER_COLLAPSED: &str = "sidebar-collapsed-view";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
    MobileHidden,
    MobileShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    /// Viewport width in CSS pixels.
    Resize(u32),
    Toggle,
    PointerEnter,
    PointerLeave,
    /// A click outside both the sidebar and its toggle button.
    OutsideClick,
}

/// Class membership for the sidebar element and the main content wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarClasses {
    pub sidebar: Vec<&'static str>,
    pub wrapper: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    width: u32,
    user_collapsed: bool,
    state: SidebarState,
}

fn is_mobile(width: u32) -> bool {
    width <= MOBILE_BREAKPOINT
}

impl Sidebar {
    pub fn new(width: u32) -> Self {
        let mut sidebar = Self {
            width,
            user_collapsed: false,
            state: SidebarState::Expanded,
        };
        sidebar.fit_viewport();
        sidebar
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn user_collapsed(&self) -> bool {
        self.user_collapsed
    }

    pub fn handle(&mut self, event: SidebarEvent) -> SidebarState {
        let mobile = is_mobile(self.width);

        match event {
            SidebarEvent::Resize(width) => {
                self.width = width;
                self.fit_viewport();
            }
            SidebarEvent::Toggle if mobile => {
                self.state = match self.state {
                    SidebarState::MobileShown => SidebarState::MobileHidden,
                    _ => SidebarState::MobileShown,
                };
            }
            SidebarEvent::Toggle => {
                self.user_collapsed = !self.user_collapsed;
                self.state = self.desktop_resting_state();
            }
            SidebarEvent::PointerEnter if !mobile && !self.user_collapsed => {
                self.state = SidebarState::Expanded;
            }
            SidebarEvent::PointerLeave if !mobile && !self.user_collapsed => {
                self.state = SidebarState::Collapsed;
            }
            SidebarEvent::OutsideClick if mobile && self.state == SidebarState::MobileShown => {
                self.state = SidebarState::MobileHidden;
            }
            SidebarEvent::PointerEnter | SidebarEvent::PointerLeave | SidebarEvent::OutsideClick => {}
        }

        self.state
    }

    pub fn classes(&self) -> SidebarClasses {
        let (sidebar, wrapper) = match self.state {
            SidebarState::Expanded => (vec![], vec![]),
            SidebarState::Collapsed => (vec![CLASS_COLLAPSED], vec![CLASS_WRAPPER_COLLAPSED]),
            SidebarState::MobileHidden => (vec![CLASS_COLLAPSED], vec![]),
            SidebarState::MobileShown => (vec![CLASS_COLLAPSED, CLASS_SHOW], vec![]),
        };
        SidebarClasses { sidebar, wrapper }
    }

    /// Entering mobile clears the user flag and hides the sidebar; desktop
    /// returns to whatever the user flag says.
    fn fit_viewport(&mut self) {
        if is_mobile(self.width) {
            self.user_collapsed = false;
            self.state = SidebarState::MobileHidden;
        } else {
            self.state = self.desktop_resting_state();
        }
    }

    fn desktop_resting_state(&self) -> SidebarState {
        if self.user_collapsed {
            SidebarState::Collapsed
        } else {
            SidebarState::Expanded
        }
    }
}
