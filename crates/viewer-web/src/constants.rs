// Page contract: element ids looked up at startup, and the model asset path.

pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_ID: &str = "loadingDisplay";
pub const NAME_LABEL_ID: &str = "nameDisplay";
pub const INFO_PANEL_ID: &str = "infoPanel";
pub const INFO_TITLE_ID: &str = "infoPanelTitle";
pub const INFO_DESCRIPTION_ID: &str = "infoPanelDescription";
pub const INFO_IMAGE_ID: &str = "infoPanelImage";
pub const CLOSE_BUTTON_ID: &str = "closeButton";

// Class toggled on the info panel to reveal it
pub const PANEL_ACTIVE_CLASS: &str = "active";
// Selector used to tell panel clicks apart from scene clicks
pub const INFO_PANEL_SELECTOR: &str = "#infoPanel";

pub const MODEL_PATH: &str = "models/1.glb";
