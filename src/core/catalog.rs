use crate::domain::model::{Service, ServiceId};

pub static CATALOG: [Service; 4] = [
    Service {
        id: ServiceId::LandPlot,
        label: "Межевание земельного участка",
        base_price: 15000,
        price_per_unit: 300,
    },
    Service {
        id: ServiceId::TechPlan,
        label: "Технический план здания",
        base_price: 20000,
        price_per_unit: 500,
    },
    Service {
        id: ServiceId::Document,
        label: "Акт обследования",
        base_price: 12000,
        price_per_unit: 200,
    },
    Service {
        id: ServiceId::Consultation,
        label: "Консультация",
        base_price: 5000,
        price_per_unit: 0,
    },
];

pub fn find_service(id: &str) -> Option<&'static Service> {
    CATALOG.iter().find(|service| service.id.as_str() == id)
}

pub fn service(id: ServiceId) -> &'static Service {
    // every ServiceId variant has exactly one catalog row
    match id {
        ServiceId::LandPlot => &CATALOG[0],
        ServiceId::TechPlan => &CATALOG[1],
        ServiceId::Document => &CATALOG[2],
        ServiceId::Consultation => &CATALOG[3],
    }
}
